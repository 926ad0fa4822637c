// Widget creation functions (header, group frames, action buttons)

use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Button, Frame, Grid, Image, Label, Orientation};

use debian_control_center::actions::{Action, ActionGroup};
use debian_control_center::config::gui::{WELCOME_TEXT, WIDGET_SPACING};

/// Buttons per grid row
pub const COLUMNS: usize = 2;

/// Create the bold greeting at the top of the window
pub fn create_header_label() -> Label {
    let label = Label::new(None);
    label.set_markup(&format!("<b>{}</b>", glib::markup_escape_text(WELCOME_TEXT)));
    label.set_halign(Align::Center);
    label.set_margin_top(8);
    label.set_margin_bottom(8);
    label
}

/// Create a titled frame holding an empty grid for `group`
pub fn create_group_frame(group: &ActionGroup) -> (Frame, Grid) {
    let frame = Frame::new(Some(group.title));
    let grid = Grid::new();
    grid.set_row_spacing(WIDGET_SPACING as u32);
    grid.set_column_spacing(WIDGET_SPACING as u32);
    grid.set_column_homogeneous(true);
    grid.set_margin_top(WIDGET_SPACING);
    grid.set_margin_bottom(WIDGET_SPACING);
    grid.set_margin_start(WIDGET_SPACING);
    grid.set_margin_end(WIDGET_SPACING);
    frame.set_child(Some(&grid));
    (frame, grid)
}

/// Create a button showing the action's theme icon and label
pub fn create_action_button(action: &Action) -> Button {
    let content = GtkBox::new(Orientation::Horizontal, WIDGET_SPACING);
    let icon = Image::from_icon_name(action.icon);
    let label = Label::new(Some(action.label));
    label.set_halign(Align::Start);
    label.set_hexpand(true);
    content.append(&icon);
    content.append(&label);

    let button = Button::new();
    button.set_child(Some(&content));
    button.set_hexpand(true);
    button.set_tooltip_text(Some(action.label));
    button
}

/// Grid cell (column, row) of the `index`-th button
pub fn cell(index: usize) -> (i32, i32) {
    ((index % COLUMNS) as i32, (index / COLUMNS) as i32)
}
