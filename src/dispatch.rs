//! Turns a catalog action into at most one spawned process.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::actions::{Action, ActionKind};
use crate::config::flatpak::{BINARY as FLATPAK, BRANCH};
use crate::config::messages::{CONFIRM_TITLE, ERROR_TITLE};
use crate::config::paths::{DEB_ARCHIVE_DIR, DEB_FILTER_NAME, DEB_PATTERN, DEB_PICKER_TITLE};
use crate::config::privilege::ESCALATION_BINARY;
use crate::error::{LaunchError, LaunchResult};
use crate::gate::ConfirmationGate;
use crate::launcher::{run_in_terminal, run_privileged, TerminalCandidate, TERMINALS};
use crate::process::{os_argv, BinaryProbe, Spawner};
use crate::prompt::Prompter;
use crate::utils::flatpak_arch;

const DEB_VIEWER: &str = "deb-gview";

/// What happened to a dispatched action
#[derive(Debug)]
pub enum Outcome {
    /// A process was started; `program` is the binary actually spawned
    Spawned { program: String },
    /// The confirmation gate answered no
    Declined,
    /// The file picker was closed without a choice
    Cancelled,
    /// Nothing was started. The user has already been told, or the failure
    /// was only logged
    Failed(LaunchError),
}

impl Outcome {
    pub fn spawned(&self) -> bool {
        matches!(self, Outcome::Spawned { .. })
    }
}

/// Everything dispatch needs from the host
pub struct Dispatcher<P, S> {
    probe: P,
    spawner: S,
    terminals: &'static [TerminalCandidate],
    deb_dir: PathBuf,
}

impl<P: BinaryProbe, S: Spawner> Dispatcher<P, S> {
    pub fn new(probe: P, spawner: S) -> Self {
        Self {
            probe,
            spawner,
            terminals: TERMINALS,
            deb_dir: PathBuf::from(DEB_ARCHIVE_DIR),
        }
    }

    /// Replace the terminal preference list
    pub fn with_terminals(mut self, terminals: &'static [TerminalCandidate]) -> Self {
        self.terminals = terminals;
        self
    }

    /// Start the package picker somewhere other than the APT archive
    #[cfg(test)]
    pub fn with_deb_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.deb_dir = dir.into();
        self
    }

    pub fn dispatch(&self, action: &Action, prompter: &dyn Prompter) -> Outcome {
        info!(action = action.id, "dispatching");
        match action.kind {
            ActionKind::Plain { program, args } => {
                let argv = argv_of(program, args.iter().copied());
                self.spawn_or_warn(action.label, argv, prompter)
            }
            ActionKind::Privileged { command } => match run_privileged(&self.spawner, command) {
                Ok(_) => Outcome::Spawned {
                    program: ESCALATION_BINARY.to_string(),
                },
                // Logged by the launcher; no dialog for this one.
                Err(e) => Outcome::Failed(e),
            },
            ActionKind::Terminal {
                title,
                command,
                question,
            } => {
                let mut gate = ConfirmationGate::new(CONFIRM_TITLE, question);
                match gate.guard(prompter, || self.run_terminal(title, command)) {
                    None => {
                        info!(action = action.id, "declined");
                        Outcome::Declined
                    }
                    Some(Ok(terminal)) => Outcome::Spawned {
                        program: terminal.to_string(),
                    },
                    Some(Err(e)) => self.report(e, prompter),
                }
            }
            ActionKind::FirstAvailable { programs, missing } => {
                match programs.iter().find(|p| self.probe.is_installed(p)) {
                    Some(program) => self.spawn_or_warn(action.label, argv_of(program, std::iter::empty()), prompter),
                    None => self.report(LaunchError::missing_binary(missing), prompter),
                }
            }
            ActionKind::Flatpak { app_id, command, name } => {
                if !self.probe.is_installed(FLATPAK) {
                    return self.report(LaunchError::missing_binary("Flatpak"), prompter);
                }
                self.spawn_or_warn(name, os_argv(flatpak_command_line(app_id, command)), prompter)
            }
            ActionKind::PackageViewer => self.open_package(prompter),
        }
    }

    pub fn run_terminal(&self, title: &str, command: &str) -> LaunchResult<&'static str> {
        run_in_terminal(&self.probe, &self.spawner, self.terminals, title, command)
    }

    fn open_package(&self, prompter: &dyn Prompter) -> Outcome {
        let picked = prompter.pick_file(DEB_PICKER_TITLE, &self.deb_dir, DEB_FILTER_NAME, DEB_PATTERN);
        let Some(path) = picked.filter(|p| !p.as_os_str().is_empty()) else {
            return Outcome::Cancelled;
        };
        if !self.probe.is_installed(DEB_VIEWER) {
            return self.report(LaunchError::missing_binary(DEB_VIEWER), prompter);
        }
        let argv = vec![OsString::from(DEB_VIEWER), path.into_os_string()];
        self.spawn_or_warn(DEB_VIEWER, argv, prompter)
    }

    fn spawn_or_warn(&self, label: &str, argv: Vec<OsString>, prompter: &dyn Prompter) -> Outcome {
        match self.spawner.spawn(&argv) {
            Ok(pid) => {
                let program = argv[0].to_string_lossy().into_owned();
                info!(pid, program = %program, "launched");
                Outcome::Spawned { program }
            }
            Err(e) => self.report(LaunchError::spawn(label, e), prompter),
        }
    }

    fn report(&self, err: LaunchError, prompter: &dyn Prompter) -> Outcome {
        if err.is_missing_binary() {
            warn!(error = %err, "required tool missing");
        } else {
            error!(error = %err, "launch failed");
        }
        prompter.warn(ERROR_TITLE, &err.to_string());
        Outcome::Failed(err)
    }
}

/// `flatpak run --branch=stable --arch=<arch> --command=<command> <app_id>`
pub fn flatpak_command_line(app_id: &str, command: &str) -> Vec<String> {
    vec![
        FLATPAK.to_string(),
        "run".to_string(),
        format!("--branch={}", BRANCH),
        format!("--arch={}", flatpak_arch()),
        format!("--command={}", command),
        app_id.to_string(),
    ]
}

fn argv_of<'a>(program: &'a str, args: impl IntoIterator<Item = &'a str>) -> Vec<OsString> {
    os_argv(std::iter::once(program).chain(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::find;
    use crate::launcher::terminal::HostStyle;
    use crate::process::testing::{FakeProbe, RecordingSpawner};
    use crate::prompt::testing::ScriptedPrompter;

    const TEST_TERMINALS: &[TerminalCandidate] = &[
        TerminalCandidate::new("term-a", HostStyle::Argv(&["-e"])),
        TerminalCandidate::new("term-b", HostStyle::Argv(&["-e"])),
    ];

    fn dispatcher<'a>(
        probe: &'a FakeProbe,
        spawner: &'a RecordingSpawner,
    ) -> Dispatcher<&'a FakeProbe, &'a RecordingSpawner> {
        Dispatcher::new(probe, spawner).with_terminals(TEST_TERMINALS)
    }

    #[test]
    fn declined_upgrade_spawns_nothing() {
        let probe = FakeProbe::with(&["term-a"]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::answering(false);

        let outcome = dispatcher(&probe, &spawner).dispatch(find("apt-upgrade").unwrap(), &prompter);

        assert!(matches!(outcome, Outcome::Declined));
        assert_eq!(spawner.count(), 0);
        assert!(probe.probed.borrow().is_empty());
        assert_eq!(*prompter.questions.borrow(), vec!["Atualizar todos os pacotes?"]);
    }

    #[test]
    fn every_destructive_action_asks_first() {
        for id in ["apt-clean", "apt-autoremove", "apt-fix-broken", "apt-upgrade"] {
            let probe = FakeProbe::with(&["term-a"]);
            let spawner = RecordingSpawner::default();
            let prompter = ScriptedPrompter::answering(false);

            dispatcher(&probe, &spawner).dispatch(find(id).unwrap(), &prompter);

            assert_eq!(prompter.questions.borrow().len(), 1, "{id}");
            assert_eq!(spawner.count(), 0, "{id}");
        }
    }

    #[test]
    fn confirmed_fix_broken_opens_one_terminal() {
        let probe = FakeProbe::with(&["term-a", "term-b"]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::answering(true);

        let outcome = dispatcher(&probe, &spawner).dispatch(find("apt-fix-broken").unwrap(), &prompter);

        assert!(matches!(outcome, Outcome::Spawned { ref program } if program == "term-a"));
        assert_eq!(spawner.count(), 1);
        let argv = spawner.last().unwrap();
        assert_eq!(argv[..4], ["term-a", "-e", "bash", "-lc"]);
        assert!(argv[4].to_string_lossy().starts_with("sudo apt --fix-broken install -y;"));
    }

    #[test]
    fn confirmed_action_without_terminal_warns() {
        let probe = FakeProbe::with(&[]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::answering(true);

        let outcome = dispatcher(&probe, &spawner).dispatch(find("apt-clean").unwrap(), &prompter);

        assert!(matches!(outcome, Outcome::Failed(LaunchError::NoTerminal { .. })));
        assert_eq!(spawner.count(), 0);
        let warnings = prompter.warnings.borrow();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("term-a, term-b"));
    }

    #[test]
    fn privileged_actions_go_through_pkexec() {
        let probe = FakeProbe::with(&[]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::default();

        let outcome = dispatcher(&probe, &spawner).dispatch(find("grub-edit").unwrap(), &prompter);

        assert!(outcome.spawned());
        let argv = spawner.last().unwrap();
        assert_eq!(argv[0], "pkexec");
        assert_eq!(argv.last().unwrap(), "kate /etc/default/grub");
        assert!(prompter.questions.borrow().is_empty());
    }

    #[test]
    fn privileged_spawn_failure_is_not_shown() {
        let probe = FakeProbe::with(&[]);
        let spawner = RecordingSpawner::failing(&["pkexec"]);
        let prompter = ScriptedPrompter::default();

        let outcome = dispatcher(&probe, &spawner).dispatch(find("gparted").unwrap(), &prompter);

        assert!(matches!(outcome, Outcome::Failed(LaunchError::Spawn { .. })));
        assert!(prompter.warnings.borrow().is_empty());
    }

    #[test]
    fn plain_spawn_failure_is_shown() {
        let probe = FakeProbe::with(&[]);
        let spawner = RecordingSpawner::failing(&["gdebi-gtk"]);
        let prompter = ScriptedPrompter::default();

        dispatcher(&probe, &spawner).dispatch(find("gdebi").unwrap(), &prompter);

        let warnings = prompter.warnings.borrow();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Não foi possível executar Instalador de Pacotes .deb"));
    }

    #[test]
    fn cancelled_picker_spawns_no_viewer() {
        let probe = FakeProbe::with(&["deb-gview"]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::default();

        let outcome = dispatcher(&probe, &spawner).dispatch(find("deb-viewer").unwrap(), &prompter);

        assert!(matches!(outcome, Outcome::Cancelled));
        assert_eq!(spawner.count(), 0);
        assert_eq!(*prompter.pickers.borrow(), vec![PathBuf::from("/var/cache/apt/archives")]);
    }

    #[test]
    fn empty_picked_path_counts_as_cancel() {
        let probe = FakeProbe::with(&["deb-gview"]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::picking("");

        let outcome = dispatcher(&probe, &spawner).dispatch(find("deb-viewer").unwrap(), &prompter);

        assert!(matches!(outcome, Outcome::Cancelled));
        assert_eq!(spawner.count(), 0);
    }

    #[test]
    fn picked_package_opens_in_viewer() {
        let probe = FakeProbe::with(&["deb-gview"]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::picking("/tmp/pkgs/hello_2.10_amd64.deb");

        let outcome = dispatcher(&probe, &spawner)
            .with_deb_dir("/tmp/pkgs")
            .dispatch(find("deb-viewer").unwrap(), &prompter);

        assert!(outcome.spawned());
        assert_eq!(spawner.last().unwrap(), ["deb-gview", "/tmp/pkgs/hello_2.10_amd64.deb"]);
        assert_eq!(*prompter.pickers.borrow(), vec![PathBuf::from("/tmp/pkgs")]);
    }

    #[test]
    fn picked_path_bytes_reach_the_viewer() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let raw = OsString::from_vec(b"/tmp/pkgs/caf\xe9_1.0_all.deb".to_vec());
        let probe = FakeProbe::with(&["deb-gview"]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::picking(raw);

        dispatcher(&probe, &spawner).dispatch(find("deb-viewer").unwrap(), &prompter);

        assert_eq!(spawner.last().unwrap()[1].as_bytes(), b"/tmp/pkgs/caf\xe9_1.0_all.deb");
    }

    #[test]
    fn missing_viewer_warns_after_pick() {
        let probe = FakeProbe::with(&[]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::picking("/var/cache/apt/archives/a.deb");

        dispatcher(&probe, &spawner).dispatch(find("deb-viewer").unwrap(), &prompter);

        assert_eq!(spawner.count(), 0);
        assert_eq!(*prompter.warnings.borrow(), vec!["deb-gview não instalado."]);
    }

    #[test]
    fn hardinfo_falls_back_to_legacy_binary() {
        let probe = FakeProbe::with(&["hardinfo"]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::default();

        dispatcher(&probe, &spawner).dispatch(find("hardinfo").unwrap(), &prompter);

        assert_eq!(spawner.last().unwrap(), ["hardinfo"]);
    }

    #[test]
    fn missing_hardinfo_warns() {
        let probe = FakeProbe::with(&[]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::default();

        dispatcher(&probe, &spawner).dispatch(find("hardinfo").unwrap(), &prompter);

        assert_eq!(spawner.count(), 0);
        assert_eq!(*prompter.warnings.borrow(), vec!["Hardinfo não instalado."]);
    }

    #[test]
    fn flatpak_apps_need_the_runtime() {
        let probe = FakeProbe::with(&[]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::default();

        dispatcher(&probe, &spawner).dispatch(find("warehouse").unwrap(), &prompter);

        assert_eq!(spawner.count(), 0);
        assert_eq!(*prompter.warnings.borrow(), vec!["Flatpak não instalado."]);
    }

    #[test]
    fn flatpak_apps_run_stable_branch() {
        let probe = FakeProbe::with(&["flatpak"]);
        let spawner = RecordingSpawner::default();
        let prompter = ScriptedPrompter::default();

        dispatcher(&probe, &spawner).dispatch(find("resources").unwrap(), &prompter);

        let argv = spawner.last().unwrap();
        assert_eq!(argv[..3], ["flatpak", "run", "--branch=stable"]);
        assert!(argv[3].to_string_lossy().starts_with("--arch="));
        assert_eq!(argv[4..], ["--command=resources", "net.nokyan.Resources"]);
    }

    #[test]
    fn flatpak_spawn_failure_names_the_app() {
        let probe = FakeProbe::with(&["flatpak"]);
        let spawner = RecordingSpawner::failing(&["flatpak"]);
        let prompter = ScriptedPrompter::default();

        dispatcher(&probe, &spawner).dispatch(find("flatsweep").unwrap(), &prompter);

        assert!(prompter.warnings.borrow()[0].starts_with("Não foi possível executar Flatsweep:"));
    }
}
