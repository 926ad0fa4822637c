use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::sync::Mutex;

use anyhow::{Context, Result};
use debian_control_center::actions::{self, Action, ActionKind, GROUPS};
use debian_control_center::logging;
use debian_control_center::process::{SystemProbe, SystemSpawner};
use debian_control_center::prompt::Prompter;
use debian_control_center::{Dispatcher, Outcome};

const USAGE: &str = "Usage: dcc-cli list [--json]\n       dcc-cli run <action-id> [--yes] [--wait]";

/// A parsed command line
#[derive(Debug)]
enum Command {
    List { json: bool },
    Run {
        action: &'static Action,
        assume_yes: bool,
        wait: bool,
    },
}

/// Why the command line was rejected; always exits with status 2
#[derive(Debug, PartialEq, Eq)]
enum UsageError {
    Malformed,
    UnknownAction(String),
}

fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let flag = |name: &str| args.iter().any(|a| a == name);
    match args.first().map(String::as_str) {
        Some("list") => Ok(Command::List { json: flag("--json") }),
        Some("run") => {
            let id = args
                .get(1)
                .filter(|a| !a.starts_with("--"))
                .ok_or(UsageError::Malformed)?;
            let action = actions::find(id).ok_or_else(|| UsageError::UnknownAction(id.clone()))?;
            Ok(Command::Run {
                action,
                assume_yes: flag("--yes"),
                wait: flag("--wait"),
            })
        }
        _ => Err(UsageError::Malformed),
    }
}

/// Whether a typed answer counts as yes
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "s" | "S" | "sim" | "y" | "Y" | "yes")
}

/// Turns a typed path into a pick; an empty line cancels
fn picked_path(line: &str, dir: &Path) -> Option<PathBuf> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let path = PathBuf::from(line);
    Some(if path.is_relative() { dir.join(path) } else { path })
}

/// Marker printed after privileged actions in `list`
fn root_marker(kind: &ActionKind) -> &'static str {
    if kind.is_destructive() {
        " [root, terminal]"
    } else if matches!(kind, ActionKind::Privileged { .. }) {
        " [root]"
    } else {
        ""
    }
}

/// Prompter reading answers from stdin
struct TtyPrompter {
    assume_yes: bool,
}

impl TtyPrompter {
    fn read_line(&self, prompt: &str) -> Option<String> {
        eprint!("{}", prompt);
        let _ = io::stderr().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Prompter for TtyPrompter {
    fn confirm(&self, title: &str, text: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let answer = self.read_line(&format!("{}: {} [s/N] ", title, text.replace('\n', " ")));
        answer.as_deref().is_some_and(is_yes)
    }

    fn warn(&self, title: &str, text: &str) {
        eprintln!("{}: {}", title, text);
    }

    fn pick_file(&self, title: &str, dir: &Path, _filter_name: &str, pattern: &str) -> Option<PathBuf> {
        let line = self.read_line(&format!("{} ({} em {}): ", title, pattern, dir.display()))?;
        picked_path(&line, dir)
    }
}

fn list(json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(GROUPS).context("Failed to serialize catalog")?;
        println!("{}", out);
        return Ok(());
    }
    for group in GROUPS {
        println!("{}", group.title);
        for action in group.actions {
            println!("  {:<18} {}{}", action.id, action.label, root_marker(&action.kind));
        }
    }
    Ok(())
}

fn run(action: &Action, assume_yes: bool, wait: bool) -> Result<ExitCode> {
    let prompter = TtyPrompter { assume_yes };

    let (tx, rx) = mpsc::channel();
    let spawner = if wait {
        let tx = Mutex::new(tx);
        SystemSpawner::with_completion(move |_argv, status| {
            if let Ok(tx) = tx.lock() {
                let _ = tx.send(status.map(|s| s.code()));
            }
        })
    } else {
        SystemSpawner::new()
    };
    let dispatcher = Dispatcher::new(SystemProbe::new(), spawner);

    let outcome = dispatcher.dispatch(action, &prompter);
    // Only a running reaper may still hold the sender.
    drop(dispatcher);

    match outcome {
        Outcome::Spawned { program } => {
            println!("Started {}", program);
            if wait {
                match rx.recv().context("Child reaper exited early")? {
                    Ok(Some(code)) => println!("{} exited with status {}", program, code),
                    Ok(None) => println!("{} terminated by a signal", program),
                    Err(e) => eprintln!("Failed to wait for {}: {}", program, e),
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Declined | Outcome::Cancelled => Ok(ExitCode::SUCCESS),
        Outcome::Failed(e) => {
            eprintln!("Failed: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> Result<ExitCode> {
    logging::init();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args) {
        Ok(Command::List { json }) => list(json).map(|_| ExitCode::SUCCESS),
        Ok(Command::Run {
            action,
            assume_yes,
            wait,
        }) => run(action, assume_yes, wait),
        Err(e) => {
            if let UsageError::UnknownAction(id) = e {
                eprintln!("Unknown action: {}", id);
            }
            eprintln!("{}", USAGE);
            Ok(ExitCode::from(2))
        }
    }
}
