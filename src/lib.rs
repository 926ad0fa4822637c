// lib.rs for debian-control-center
// Launch logic shared by the GTK window and the `dcc-cli` helper.

pub mod actions;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gate;
pub mod launcher;
pub mod logging;
pub mod process;
pub mod prompt;
pub mod utils;

pub use dispatch::{Dispatcher, Outcome};
pub use error::{LaunchError, LaunchResult};
