//! Modal interactions a front-end has to provide.

use std::path::{Path, PathBuf};

/// Synchronous dialogs used while dispatching an action.
///
/// Every method blocks until the user answers. GTK implements it with modal
/// dialogs, the command-line helper with stdin.
pub trait Prompter {
    /// Yes/no question; dismissing counts as no
    fn confirm(&self, title: &str, text: &str) -> bool;

    /// Single-acknowledgement warning
    fn warn(&self, title: &str, text: &str);

    /// Pick one file below `dir` matching `pattern`; `None` when cancelled
    fn pick_file(&self, title: &str, dir: &Path, filter_name: &str, pattern: &str) -> Option<PathBuf>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Scripted answers plus a log of everything shown
    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub answer: bool,
        pub picked: Option<PathBuf>,
        pub questions: RefCell<Vec<String>>,
        pub warnings: RefCell<Vec<String>>,
        pub pickers: RefCell<Vec<PathBuf>>,
    }

    impl ScriptedPrompter {
        pub fn answering(answer: bool) -> Self {
            Self {
                answer,
                ..Self::default()
            }
        }

        pub fn picking(path: impl Into<PathBuf>) -> Self {
            Self {
                picked: Some(path.into()),
                ..Self::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&self, _title: &str, text: &str) -> bool {
            self.questions.borrow_mut().push(text.to_string());
            self.answer
        }

        fn warn(&self, _title: &str, text: &str) {
            self.warnings.borrow_mut().push(text.to_string());
        }

        fn pick_file(&self, _title: &str, dir: &Path, _filter_name: &str, _pattern: &str) -> Option<PathBuf> {
            self.pickers.borrow_mut().push(dir.to_path_buf());
            self.picked.clone()
        }
    }
}
