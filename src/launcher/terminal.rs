//! Terminal discovery and terminal-hosted commands.
//!
//! Candidates are tried in declaration order. The first one that resolves on
//! `PATH` *and* starts wins; a terminal that is installed but fails to start
//! is logged and skipped.

use tracing::{error, info, warn};

use crate::config::privilege::SHELL;
use crate::config::terminal::{CLOSE_PROMPT, DONE_BANNER};
use crate::error::{LaunchError, LaunchResult};
use crate::process::{os_argv, BinaryProbe, Spawner};
use crate::utils::shell_quote;

/// How a terminal expects the program it should host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStyle {
    /// Remaining arguments form the argument vector (`konsole -e`, `kgx --`)
    Argv(&'static [&'static str]),
    /// One argument holding a whole shell command (`tilix -e`)
    ShellString(&'static [&'static str]),
    /// Like `Argv`, with the window title passed through `title_flag`
    TitledArgv {
        title_flag: &'static str,
        exec_flag: &'static str,
    },
}

/// A terminal emulator the runner knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCandidate {
    pub binary: &'static str,
    pub style: HostStyle,
}

impl TerminalCandidate {
    pub const fn new(binary: &'static str, style: HostStyle) -> Self {
        Self { binary, style }
    }

    /// Full argument vector that opens this terminal running `script` in a
    /// login shell.
    pub fn invocation(&self, title: &str, script: &str) -> Vec<String> {
        let mut argv = vec![self.binary.to_string()];
        match self.style {
            HostStyle::Argv(flags) => {
                argv.extend(flags.iter().map(|f| f.to_string()));
                argv.extend([SHELL.to_string(), "-lc".to_string(), script.to_string()]);
            }
            HostStyle::ShellString(flags) => {
                argv.extend(flags.iter().map(|f| f.to_string()));
                argv.push(format!("{} -lc {}", SHELL, shell_quote(script)));
            }
            HostStyle::TitledArgv {
                title_flag,
                exec_flag,
            } => {
                argv.extend([title_flag.to_string(), title.to_string(), exec_flag.to_string()]);
                argv.extend([SHELL.to_string(), "-lc".to_string(), script.to_string()]);
            }
        }
        argv
    }
}

/// Supported terminals in order of preference
pub const TERMINALS: &[TerminalCandidate] = &[
    TerminalCandidate::new("konsole", HostStyle::Argv(&["-e"])),
    TerminalCandidate::new("konsole6", HostStyle::Argv(&["-e"])),
    TerminalCandidate::new("qterminal", HostStyle::ShellString(&["-e"])),
    TerminalCandidate::new("tilix", HostStyle::ShellString(&["-e"])),
    TerminalCandidate::new("xfce4-terminal", HostStyle::Argv(&["-x"])),
    TerminalCandidate::new("kgx", HostStyle::Argv(&["--"])),
    TerminalCandidate::new(
        "xterm",
        HostStyle::TitledArgv {
            title_flag: "-T",
            exec_flag: "-e",
        },
    ),
];

/// Script run inside the terminal: the command as root, a banner, then a
/// keypress so the output stays on screen.
pub fn hosted_script(command: &str) -> String {
    format!(
        "sudo {}; echo; echo {}; read -p {} _",
        command,
        shell_quote(DONE_BANNER),
        shell_quote(CLOSE_PROMPT)
    )
}

/// Opens the first available terminal from `candidates` running `command`.
///
/// Returns the binary name of the terminal that was started. When every
/// candidate is missing or fails to start, nothing runs and
/// [`LaunchError::NoTerminal`] names the whole set.
pub fn run_in_terminal<P, S>(
    probe: &P,
    spawner: &S,
    candidates: &[TerminalCandidate],
    title: &str,
    command: &str,
) -> LaunchResult<&'static str>
where
    P: BinaryProbe,
    S: Spawner,
{
    if command.trim().is_empty() {
        return Err(LaunchError::EmptyCommand);
    }
    let script = hosted_script(command);

    for candidate in candidates {
        if !probe.is_installed(candidate.binary) {
            continue;
        }
        let argv = os_argv(candidate.invocation(title, &script));
        match spawner.spawn(&argv) {
            Ok(pid) => {
                info!(terminal = candidate.binary, pid, title, "opened terminal");
                return Ok(candidate.binary);
            }
            Err(e) => {
                warn!(terminal = candidate.binary, error = %e, "terminal failed to start, trying next");
            }
        }
    }

    error!(title, "no usable terminal emulator found");
    Err(LaunchError::NoTerminal {
        tried: candidates.iter().map(|c| c.binary.to_string()).collect(),
    })
}
