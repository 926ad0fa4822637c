//! Runs shell commands as root through `pkexec`.

use std::ffi::OsString;

use tracing::{error, info};

use crate::config::privilege::{ESCALATION_BINARY, PASSTHROUGH_VARS, SHELL};
use crate::error::{LaunchError, LaunchResult};
use crate::process::{os_argv, Spawner};

/// Display variables a root GUI process needs, read at dispatch time.
///
/// Values are kept as raw `OsString`s, so bytes that are not UTF-8 pass
/// through untouched. Unset variables are kept as empty values so the
/// escalated environment always carries both assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSnapshot {
    pub display: OsString,
    pub xauthority: OsString,
}

impl EnvSnapshot {
    pub fn capture() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let [display, xauthority] = PASSTHROUGH_VARS.map(|key| lookup(key).unwrap_or_default());
        Self { display, xauthority }
    }

    fn assignments(&self) -> [OsString; 2] {
        [
            assignment(PASSTHROUGH_VARS[0], &self.display),
            assignment(PASSTHROUGH_VARS[1], &self.xauthority),
        ]
    }
}

fn assignment(key: &str, value: &OsString) -> OsString {
    let mut pair = OsString::from(format!("{}=", key));
    pair.push(value);
    pair
}

/// `pkexec env DISPLAY=.. XAUTHORITY=.. bash -lc <command>`
pub fn command_line(command: &str, env: &EnvSnapshot) -> Vec<OsString> {
    let mut argv = os_argv([ESCALATION_BINARY, "env"]);
    argv.extend(env.assignments());
    argv.extend(os_argv([SHELL, "-lc", command]));
    argv
}

/// Spawns `command` with elevated rights and returns without waiting.
///
/// A failure to start `pkexec` is logged and returned; callers do not turn it
/// into a dialog.
pub fn run_privileged<S: Spawner>(spawner: &S, command: &str) -> LaunchResult<u32> {
    if command.trim().is_empty() {
        return Err(LaunchError::EmptyCommand);
    }
    let argv = command_line(command, &EnvSnapshot::capture());
    match spawner.spawn(&argv) {
        Ok(pid) => {
            info!(pid, command, "launched privileged command");
            Ok(pid)
        }
        Err(e) => {
            error!(command, error = %e, "error executing {}", ESCALATION_BINARY);
            Err(LaunchError::spawn(ESCALATION_BINARY, e))
        }
    }
}
