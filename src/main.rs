mod gui;

use debian_control_center::{logging, utils};
use gui::run_gui;

fn main() {
    logging::init();
    if utils::is_root() {
        tracing::warn!("running as root; tools will not start under the desktop user");
    }
    run_gui();
}
