//! Configuration constants for the control center

/// GUI configuration
pub mod gui {
    /// Application ID
    pub const APP_ID: &str = "org.debian.ControlCenter";

    /// Window title
    pub const WINDOW_TITLE: &str = "Debian Control Center";

    /// Greeting shown above the groups
    pub const WELCOME_TEXT: &str = "Bem vindo ao Debian Control Center!";

    /// Theme icon used for the window
    pub const APP_ICON: &str = "debian-control-center";

    /// Minimum window dimensions
    pub const MIN_WIDTH: i32 = 650;
    pub const MIN_HEIGHT: i32 = 500;

    /// Widget spacing
    pub const WIDGET_SPACING: i32 = 8;
    pub const SECTION_SPACING: i32 = 12;
    pub const MARGIN: i32 = 16;

    /// Width hint for dialogs
    pub const DIALOG_WIDTH: i32 = 420;
}

/// Filesystem locations
pub mod paths {
    /// Where APT keeps downloaded packages
    pub const DEB_ARCHIVE_DIR: &str = "/var/cache/apt/archives";

    /// Glob used by the package file picker
    pub const DEB_PATTERN: &str = "*.deb";

    /// Filter name shown by the package file picker
    pub const DEB_FILTER_NAME: &str = "Pacotes Debian (*.deb)";

    /// Title of the package file picker
    pub const DEB_PICKER_TITLE: &str = "Selecionar arquivo .deb";
}

/// Privilege escalation
pub mod privilege {
    /// Front-end that asks the session's polkit agent for credentials
    pub const ESCALATION_BINARY: &str = "pkexec";

    /// Variables a root GUI process needs to reach the caller's display
    pub const PASSTHROUGH_VARS: [&str; 2] = ["DISPLAY", "XAUTHORITY"];

    /// Shell used to interpret commands
    pub const SHELL: &str = "bash";
}

/// Flatpak launch parameters
pub mod flatpak {
    /// Runtime binary
    pub const BINARY: &str = "flatpak";

    /// Branch every bundled tool is run from
    pub const BRANCH: &str = "stable";
}

/// Terminal-hosted commands
pub mod terminal {
    /// Printed once the hosted command returns
    pub const DONE_BANNER: &str = "[Comando APT finalizado!]";

    /// Prompt that keeps the terminal open
    pub const CLOSE_PROMPT: &str = "Pressione ENTER para fechar...";
}

/// Dialog texts shared by every front-end
pub mod messages {
    pub const ERROR_TITLE: &str = "Erro";
    pub const CONFIRM_TITLE: &str = "Confirmar";
}
