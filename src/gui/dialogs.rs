// Modal dialogs (confirmation, warning, package picker) backing the Prompter trait

use std::path::{Path, PathBuf};

use glib::{MainContext, WeakRef};
use gtk4::prelude::*;
use gtk4::{
    ApplicationWindow, ButtonsType, FileChooserAction, FileChooserDialog, FileFilter, MessageDialog,
    MessageType, ResponseType,
};

use debian_control_center::config::gui::DIALOG_WIDTH;
use debian_control_center::prompt::Prompter;

/// Prompter that shows GTK dialogs on top of the main window.
///
/// Each method spins the default main context until the dialog answers, so
/// callers get a plain return value.
pub struct GtkPrompter {
    window: WeakRef<ApplicationWindow>,
}

impl GtkPrompter {
    pub fn new(window: &ApplicationWindow) -> Self {
        Self {
            window: window.downgrade(),
        }
    }

    fn message_dialog(&self, kind: MessageType, buttons: ButtonsType, title: &str, text: &str) -> MessageDialog {
        let dialog = MessageDialog::builder()
            .modal(true)
            .message_type(kind)
            .buttons(buttons)
            .text(title)
            .secondary_text(text)
            .build();
        dialog.set_default_width(DIALOG_WIDTH);
        if let Some(window) = self.window.upgrade() {
            dialog.set_transient_for(Some(&window));
        }
        dialog
    }
}

impl Prompter for GtkPrompter {
    fn confirm(&self, title: &str, text: &str) -> bool {
        let dialog = self.message_dialog(MessageType::Question, ButtonsType::YesNo, title, text);
        dialog.set_default_response(ResponseType::No);
        let response = MainContext::default().block_on(dialog.run_future());
        dialog.close();
        response == ResponseType::Yes
    }

    fn warn(&self, title: &str, text: &str) {
        let dialog = self.message_dialog(MessageType::Warning, ButtonsType::Ok, title, text);
        MainContext::default().block_on(dialog.run_future());
        dialog.close();
    }

    fn pick_file(&self, title: &str, dir: &Path, filter_name: &str, pattern: &str) -> Option<PathBuf> {
        let parent = self.window.upgrade();
        let dialog = FileChooserDialog::new(Some(title), parent.as_ref(), FileChooserAction::Open, &[]);
        dialog.set_modal(true);
        dialog.set_default_width(640);
        dialog.add_button("Abrir", ResponseType::Ok);
        dialog.add_button("Cancelar", ResponseType::Cancel);
        let filter = FileFilter::new();
        filter.add_pattern(pattern);
        filter.set_name(Some(filter_name));
        dialog.add_filter(&filter);

        let folder = gio::File::for_path(dir);
        let _ = dialog.set_current_folder(Some(&folder));

        let response = MainContext::default().block_on(dialog.run_future());
        let picked = if response == ResponseType::Ok {
            dialog.file().and_then(|f| f.path())
        } else {
            None
        };
        dialog.close();
        picked
    }
}
