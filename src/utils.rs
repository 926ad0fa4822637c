// Small helpers for building command lines

/// Quote `s` so a POSIX shell reads it back as a single word.
pub fn shell_quote(s: &str) -> String {
    if !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c))
    {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Flatpak's name for the architecture this binary was built for
pub fn flatpak_arch() -> &'static str {
    flatpak_arch_for(std::env::consts::ARCH)
}

fn flatpak_arch_for(rust_arch: &'static str) -> &'static str {
    match rust_arch {
        "x86" => "i386",
        "arm" => "arm",
        other => other,
    }
}

/// Utility: Check if running as root
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}
