//! Error types for launching external tools

use std::io;

use thiserror::Error;

/// Everything that can stop an action from reaching its process
#[derive(Debug, Error)]
pub enum LaunchError {
    /// A required external tool is not on `PATH`
    #[error("{0} não instalado.")]
    MissingBinary(String),

    /// None of the known terminal emulators could be started
    #[error("Nenhum terminal compatível encontrado.\nInstale: {}.", .tried.join(", "))]
    NoTerminal { tried: Vec<String> },

    /// The operating system refused to create the child process
    #[error("Não foi possível executar {program}:\n{source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Nothing to run
    #[error("Empty command line")]
    EmptyCommand,
}

/// Result type alias for convenience
pub type LaunchResult<T> = Result<T, LaunchError>;

/// Error creation helpers
impl LaunchError {
    pub fn missing_binary(name: impl Into<String>) -> Self {
        LaunchError::MissingBinary(name.into())
    }

    pub fn spawn(program: impl Into<String>, source: io::Error) -> Self {
        LaunchError::Spawn {
            program: program.into(),
            source,
        }
    }

    /// True for failures the user can fix by installing something
    pub fn is_missing_binary(&self) -> bool {
        matches!(self, LaunchError::MissingBinary(_) | LaunchError::NoTerminal { .. })
    }
}
