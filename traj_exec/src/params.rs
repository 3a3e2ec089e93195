//! # Trajectory Executable Parameters
//!
//! This module provides parameters for the trajectory executable itself. The controller and
//! simulator have their own parameter files.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrajExecParams {
    /// Minimum level of log messages, one of `info`, `debug` or `trace`
    pub log_level: String,

    /// If true the report of every trajectory is saved in the session directory
    pub archive_reports: bool,

    /// Console history file, relative to the software root
    pub history_path: String,
}

impl Default for TrajExecParams {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            archive_reports: true,
            history_path: String::from("data/history.txt"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_param_file() {
        let params: TrajExecParams =
            toml::from_str(include_str!("../../params/traj_exec.toml")).unwrap();
        assert_eq!(params, TrajExecParams::default());
    }
}
