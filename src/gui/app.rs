use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, Box as GtkBox, Orientation};

use debian_control_center::actions::GROUPS;
use debian_control_center::config::gui::{
    APP_ICON, APP_ID, MARGIN, MIN_HEIGHT, MIN_WIDTH, SECTION_SPACING, WINDOW_TITLE,
};
use debian_control_center::process::{SystemProbe, SystemSpawner};
use debian_control_center::Dispatcher;

use super::dialogs::GtkPrompter;
use super::events::connect_action;
use super::widgets::{cell, create_action_button, create_group_frame, create_header_label};

pub fn run_gui() {
    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(|app| {
        let window = ApplicationWindow::builder()
            .application(app)
            .title(WINDOW_TITLE)
            .icon_name(APP_ICON)
            .resizable(true)
            .build();
        window.set_size_request(MIN_WIDTH, MIN_HEIGHT);

        let dispatcher = Rc::new(Dispatcher::new(SystemProbe::new(), SystemSpawner::new()));
        let prompter = Rc::new(GtkPrompter::new(&window));

        // Main vertical box
        let vbox = GtkBox::new(Orientation::Vertical, SECTION_SPACING);
        vbox.set_valign(gtk4::Align::Start);
        vbox.set_margin_top(MARGIN);
        vbox.set_margin_bottom(MARGIN);
        vbox.set_margin_start(MARGIN);
        vbox.set_margin_end(MARGIN);
        vbox.append(&create_header_label());

        for group in GROUPS {
            let (frame, grid) = create_group_frame(group);
            for (index, action) in group.actions.iter().enumerate() {
                let button = create_action_button(action);
                connect_action(&button, action, dispatcher.clone(), prompter.clone());
                let (column, row) = cell(index);
                grid.attach(&button, column, row, 1, 1);
            }
            vbox.append(&frame);
        }

        window.set_child(Some(&vbox));
        window.present();
    });

    app.run();
}
