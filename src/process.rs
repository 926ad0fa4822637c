//! Binary lookup and detached process creation.
//!
//! Every action ends in exactly one call to [`Spawner::spawn`] with a full
//! argument vector. The traits exist so dispatch logic can be exercised
//! without touching the host.

use std::ffi::OsString;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;

use tracing::{debug, warn};

/// Resolves binary names against the search path
pub trait BinaryProbe {
    fn resolve(&self, name: &str) -> Option<PathBuf>;

    fn is_installed(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}

/// Creates a child process from an argument vector and returns its pid
pub trait Spawner {
    fn spawn(&self, argv: &[OsString]) -> io::Result<u32>;
}

impl<T: BinaryProbe + ?Sized> BinaryProbe for &T {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        (**self).resolve(name)
    }
}

impl<T: Spawner + ?Sized> Spawner for &T {
    fn spawn(&self, argv: &[OsString]) -> io::Result<u32> {
        (**self).spawn(argv)
    }
}

/// `PATH` lookup backed by the `which` crate
#[derive(Debug, Clone, Default)]
pub struct SystemProbe {
    search_path: Option<OsString>,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe a fixed search path instead of the process' `PATH`
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl BinaryProbe for SystemProbe {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        };
        debug!(binary = name, found = found.is_ok(), "probed binary");
        found.ok()
    }
}

/// Converts an all-UTF-8 argument vector for [`Spawner::spawn`]
pub fn os_argv<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter().map(Into::into).collect()
}

/// Called from the reaper thread once a child exits
pub type ExitCallback = Arc<dyn Fn(&[OsString], io::Result<ExitStatus>) + Send + Sync>;

/// Job run on the reaper thread
type ReapJob = Box<dyn FnOnce() + Send + 'static>;

/// Starts the reaper thread named `name`
type StartReaper = fn(String, ReapJob) -> io::Result<()>;

fn start_reaper_thread(name: String, job: ReapJob) -> io::Result<()> {
    std::thread::Builder::new().name(name).spawn(job).map(|_| ())
}

/// Spawns detached children.
///
/// Each child gets its own session and a closed stdin, so closing the panel
/// never takes a running tool down with it. A reaper thread waits on the
/// child; the exit status only leaves that thread through `on_exit`.
/// Once the child is running `spawn` reports success, even when no reaper
/// could be started for it.
#[derive(Clone)]
pub struct SystemSpawner {
    on_exit: Option<ExitCallback>,
    start_reaper: StartReaper,
}

impl Default for SystemSpawner {
    fn default() -> Self {
        Self {
            on_exit: None,
            start_reaper: start_reaper_thread,
        }
    }
}

impl SystemSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every child's exit status to `callback`
    pub fn with_completion<F>(callback: F) -> Self
    where
        F: Fn(&[OsString], io::Result<ExitStatus>) + Send + Sync + 'static,
    {
        Self {
            on_exit: Some(Arc::new(callback)),
            ..Self::default()
        }
    }

    #[cfg(test)]
    fn with_reaper(start_reaper: StartReaper) -> Self {
        Self {
            start_reaper,
            ..Self::default()
        }
    }
}

impl Spawner for SystemSpawner {
    fn spawn(&self, argv: &[OsString]) -> io::Result<u32> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector"))?;

        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null());
        // SAFETY: setsid is async-signal-safe and touches no parent state.
        unsafe {
            cmd.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }

        let mut child = cmd.spawn()?;
        let pid = child.id();
        debug!(pid, program = %program.to_string_lossy(), "spawned child");

        let argv = argv.to_vec();
        let on_exit = self.on_exit.clone();
        let job: ReapJob = Box::new(move || {
            let status = child.wait();
            match &status {
                Ok(s) => debug!(pid, status = %s, "child exited"),
                Err(e) => warn!(pid, error = %e, "failed to wait on child"),
            }
            if let Some(callback) = on_exit {
                callback(&argv, status);
            }
        });
        if let Err(e) = (self.start_reaper)(format!("reap-{}", pid), job) {
            // The child is already running; it is left unreaped.
            warn!(pid, error = %e, "could not start reaper thread");
        }

        Ok(pid)
    }
}
