//! Main trajectory executable entry point.
//!
//! # Architecture
//!
//! The executable runs as follows:
//!
//!     - Initialise the session, logging and parameters
//!     - Start the turtle simulator on a background thread
//!     - Execute telecommands one at a time, either:
//!         - from a script given as the only argument, or
//!         - typed into the interactive console
//!     - Stop the simulator and close the session
//!
//! Each trajectory TC blocks until the trajectory has finished. Pressing Ctrl-C while a
//! trajectory is running cancels it, stopping the turtle.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod tc_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, warn};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::env;

// Internal
use comms_if::tc::Tc;
use tc_processor::{TcOutcome, TcProcessor};
use traj_lib::{
    clock::SystemClock,
    params::TrajExecParams,
    shutdown::{ShutdownFlag, ShutdownSignal},
    sim::{self, SimParams},
    traj_ctrl::{Params, TrajCtrl},
};
use util::{
    host,
    logger::{logger_init, parse_level},
    script_interpreter::ScriptInterpreter,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const PROMPT: &str = "turtle $ ";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("traj_exec", "sessions").wrap_err("Failed to create the session")?;

    // Load the exec parameters first, they set the log level
    let exec_params: TrajExecParams =
        util::params::load("traj_exec.toml").wrap_err("Could not load exec params")?;

    // Initialise logger
    let log_level = parse_level(&exec_params.log_level).wrap_err("Invalid log level")?;
    logger_init(log_level, &session).wrap_err("Failed to initialise logging")?;

    info!("Turtle Trajectory Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let traj_params: Params =
        util::params::load("traj_ctrl.toml").wrap_err("Could not load trajectory params")?;
    let sim_params: SimParams =
        util::params::load("sim.toml").wrap_err("Could not load simulator params")?;

    info!("Parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // If we have a single argument use it as the script path
    let script = match args.len() {
        1 => {
            info!("No script provided, using the interactive console\n");
            None
        }
        2 => {
            info!("Loading script from \"{}\"", &args[1]);

            let si = ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;
            info!("Loaded script contains {} TCs\n", si.get_num_tcs());

            Some(si)
        }
        n => {
            return Err(eyre!(
                "Expected either zero or one argument, found {}",
                n - 1
            ))
        }
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let (sim, cmd_sink) = sim::spawn(sim_params).wrap_err("Invalid simulator params")?;
    let pose = sim.pose_cell();
    let clock = SystemClock::new();

    // Ctrl-C cancels the running trajectory rather than killing the executable
    let shutdown = ShutdownFlag::new();
    {
        let flag = shutdown.clone();
        ctrlc::set_handler(move || flag.set()).wrap_err("Failed to set the Ctrl-C handler")?;
    }

    let ctrl = TrajCtrl::new(traj_params, &pose, &cmd_sink, &clock, &shutdown)
        .wrap_err("Failed to initialise TrajCtrl")?;
    info!("TrajCtrl init complete");

    info!("Module initialisation complete\n");

    let processor = TcProcessor {
        ctrl,
        sim: &sim,
        pose: &pose,
        session: &session,
        archive_reports: exec_params.archive_reports,
    };

    // ---- MAIN LOOP ----

    match script {
        Some(si) => run_script(si, &processor, &shutdown),
        None => run_console(&processor, &shutdown, &exec_params)?,
    }

    // ---- SHUTDOWN ----

    info!("End of execution");

    sim.stop();
    session.exit();

    Ok(())
}

/// Execute every TC in the script in order.
///
/// Cancelling a trajectory abandons the rest of the script.
fn run_script(script: ScriptInterpreter, processor: &TcProcessor, shutdown: &ShutdownFlag) {
    for tc in script {
        shutdown.clear();

        info!("Executing {:?}", tc);
        if processor.exec(&tc) == TcOutcome::Exit {
            break;
        }

        if tc.is_trajectory() && shutdown.is_set() {
            warn!("Trajectory cancelled, abandoning the script");
            break;
        }
    }

    info!("Script complete");
}

/// Read and execute TCs from the interactive console until `exit` or end of input.
fn run_console(
    processor: &TcProcessor,
    shutdown: &ShutdownFlag,
    exec_params: &TrajExecParams,
) -> Result<(), Report> {
    let mut rl = DefaultEditor::new().wrap_err("Failed to initialise the console")?;

    let history_path = host::get_sw_root()
        .wrap_err("Software root not set")?
        .join(&exec_params.history_path);
    if rl.load_history(&history_path).is_err() {
        debug!("No console history found at {:?}", history_path);
    }

    println!("Enter a trajectory, `help` for the list, or `exit` to quit");

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(l) => l,
            // Ctrl-C at the prompt only clears the line
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).wrap_err("Could not read from the console"),
        };

        if line.trim().is_empty() {
            continue;
        }
        rl.add_history_entry(line.as_str()).ok();

        let tc = match Tc::parse(&line) {
            Ok(tc) => tc,
            Err(e) => {
                // Includes the help and usage text
                println!("{}", e);
                continue;
            }
        };

        shutdown.clear();
        if processor.exec(&tc) == TcOutcome::Exit {
            break;
        }
    }

    if let Some(dir) = history_path.parent() {
        std::fs::create_dir_all(dir).ok();
    }
    if let Err(e) = rl.save_history(&history_path) {
        warn!("Could not save console history: {}", e);
    }

    Ok(())
}
