// Event handler functions (button clicks)

use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::Button;
use tracing::debug;

use debian_control_center::actions::Action;
use debian_control_center::process::{SystemProbe, SystemSpawner};
use debian_control_center::Dispatcher;

use super::dialogs::GtkPrompter;

pub type SystemDispatcher = Dispatcher<SystemProbe, SystemSpawner>;

/// Dispatch `action` every time `button` is clicked
pub fn connect_action(
    button: &Button,
    action: &'static Action,
    dispatcher: Rc<SystemDispatcher>,
    prompter: Rc<GtkPrompter>,
) {
    button.connect_clicked(move |_| {
        let outcome = dispatcher.dispatch(action, prompter.as_ref());
        debug!(action = action.id, ?outcome, "button handled");
    });
}
