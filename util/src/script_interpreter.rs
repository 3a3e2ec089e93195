//! # Trajectory script interpreter module
//!
//! This module provides an interpreter for trajectory scripts, allowing a sequence of
//! telecommands to be executed one after the other without an operator.
//!
//! A script is a text file of `;` terminated telecommands, each written either in the same form
//! as typed into the console or as JSON. Anything following a `#` is a comment:
//!
//! ```text
//! # Draw a square then come back to the middle
//! square 2.0;
//! goto 5.5 5.5;
//! {"Circle": {"radius_m": 1.0, "clockwise": false}};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::RegexBuilder;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A script interpreter.
///
/// After initialising with the path to the script iterate over the interpreter to get the
/// telecommands in the order they should be executed.
pub struct ScriptInterpreter {
    tcs: VecDeque<Tc>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error("Script contains an invalid TC on line {0}: {1}")]
    InvalidTc(usize, TcParseError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        let script = fs::read_to_string(&path).map_err(ScriptError::ScriptLoadError)?;

        Self::from_script(&script)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        // A TC starts at the beginning of a line with anything but a comment and runs up to the
        // next semicolon.
        let re = RegexBuilder::new(r"^[ \t]*([^;#\s][^;#]*);")
            .multi_line(true)
            .build()
            .expect("TC regex is invalid");

        let mut tcs = VecDeque::new();

        for cap in re.captures_iter(script) {
            // Group 1 always participates in a match
            let body = match cap.get(1) {
                Some(m) => m,
                None => continue,
            };

            let line = script[..body.start()].matches('\n').count() + 1;

            let tc = Tc::parse(body.as_str()).map_err(|e| ScriptError::InvalidTc(line, e))?;

            tcs.push_back(tc);
        }

        if tcs.is_empty() {
            return Err(ScriptError::ScriptEmpty);
        }

        Ok(Self { tcs })
    }

    /// Get the number of TCs remaining in the script
    pub fn get_num_tcs(&self) -> usize {
        self.tcs.len()
    }
}

impl Iterator for ScriptInterpreter {
    type Item = Tc;

    fn next(&mut self) -> Option<Self::Item> {
        self.tcs.pop_front()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_script() {
        let script = "\
# Shapes demo
square 2.0;   # trailing comment
goto
    5.5 5.5;
{\"Circle\": {\"radius_m\": 1.0, \"clockwise\": true}};
# spiral 0.5;
reset;
";
        let si = ScriptInterpreter::from_script(script).unwrap();
        assert_eq!(si.get_num_tcs(), 4);

        let tcs: Vec<Tc> = si.collect();
        assert_eq!(
            tcs,
            vec![
                Tc::Square { side_m: 2.0 },
                Tc::GoTo { x_m: 5.5, y_m: 5.5 },
                Tc::Circle {
                    radius_m: 1.0,
                    clockwise: true
                },
                Tc::Reset
            ]
        );
    }

    #[test]
    fn test_invalid_tc_line() {
        let script = "square 1.0;\n\nsquiggle 3;\n";

        match ScriptInterpreter::from_script(script) {
            Err(ScriptError::InvalidTc(line, _)) => assert_eq!(line, 3),
            Err(e) => panic!("Unexpected error {}", e),
            Ok(_) => panic!("Expected an error"),
        }
    }

    #[test]
    fn test_empty_script() {
        assert!(matches!(
            ScriptInterpreter::from_script("# nothing to see here\n"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::new("/definitely/not/a/script.txt"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
