// Launch strategies: privilege escalation and terminal-hosted commands
pub mod privilege;
pub mod terminal;

pub use privilege::{run_privileged, EnvSnapshot};
pub use terminal::{run_in_terminal, TerminalCandidate, TERMINALS};
