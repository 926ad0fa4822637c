//! The catalog of buttons shown by the control center.

use serde::Serialize;

/// How an action reaches its tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ActionKind {
    /// Unprivileged spawn
    Plain {
        program: &'static str,
        args: &'static [&'static str],
    },
    /// Shell command run through the privilege-escalation front-end
    Privileged { command: &'static str },
    /// Destructive command shown in a terminal after a confirmation
    Terminal {
        title: &'static str,
        command: &'static str,
        question: &'static str,
    },
    /// First installed binary of `programs`; `missing` names the tool otherwise
    FirstAvailable {
        programs: &'static [&'static str],
        missing: &'static str,
    },
    /// Flatpak application
    Flatpak {
        app_id: &'static str,
        command: &'static str,
        name: &'static str,
    },
    /// Pick a `.deb` file and open it in the package viewer
    PackageViewer,
}

impl ActionKind {
    pub fn is_destructive(&self) -> bool {
        matches!(self, ActionKind::Terminal { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Action {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    #[serde(flatten)]
    pub kind: ActionKind,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActionGroup {
    pub title: &'static str,
    pub actions: &'static [Action],
}

const fn plain(id: &'static str, label: &'static str, icon: &'static str, program: &'static str) -> Action {
    Action {
        id,
        label,
        icon,
        kind: ActionKind::Plain { program, args: &[] },
    }
}

const fn privileged(id: &'static str, label: &'static str, icon: &'static str, command: &'static str) -> Action {
    Action {
        id,
        label,
        icon,
        kind: ActionKind::Privileged { command },
    }
}

const fn apt(
    id: &'static str,
    label: &'static str,
    title: &'static str,
    command: &'static str,
    question: &'static str,
) -> Action {
    Action {
        id,
        label,
        icon: "debian-emblem-black",
        kind: ActionKind::Terminal {
            title,
            command,
            question,
        },
    }
}

const fn flatpak(
    id: &'static str,
    label: &'static str,
    app_id: &'static str,
    command: &'static str,
    name: &'static str,
) -> Action {
    Action {
        id,
        label,
        icon: app_id,
        kind: ActionKind::Flatpak { app_id, command, name },
    }
}

pub const DEBIAN_ADMIN: ActionGroup = ActionGroup {
    title: "Administração Debian",
    actions: &[
        privileged("synaptic", "Gerenciador de Pacotes Synaptic", "box_debian_disc", "synaptic"),
        privileged("gkdebconf", "Configurador DPKG / Debconf", "gkdebconf-icon", "gkdebconf"),
        plain("gdebi", "Instalador de Pacotes .deb", "box_debian_disc", "gdebi-gtk"),
        Action {
            id: "deb-viewer",
            label: "Visualizador de Pacotes .deb",
            icon: "deb-gview",
            kind: ActionKind::PackageViewer,
        },
        plain("dconf-editor", "Editor de Configurações Dconf", "folder-deb", "dconf-editor"),
        plain("users", "Contas de Usuários e Grupos", "debian-security", "lxqt-admin-user"),
        apt(
            "apt-clean",
            "APT - Limpar o Cache de Pacotes",
            "apt clean",
            "apt clean",
            "Isto removerá TODOS os pacotes do cache.\nDeseja continuar?",
        ),
        apt(
            "apt-autoremove",
            "APT - Remover Pacotes Órfãos",
            "apt autoremove --purge -y",
            "apt autoremove --purge -y",
            "Isto removerá somente os pacotes órfãos.\nDeseja continuar?",
        ),
        apt(
            "apt-fix-broken",
            "APT - Corrigir Dependências Quebradas",
            "apt fix-broken",
            "apt --fix-broken install -y",
            "Esta ação corrigirá as dependências quebradas.\nDeseja continuar?",
        ),
        apt(
            "apt-upgrade",
            "APT - Atualizar Pacotes",
            "apt update && sudo apt full-upgrade -y",
            "apt update && sudo apt full-upgrade -y",
            "Atualizar todos os pacotes?",
        ),
    ],
};

pub const SYSTEM_ADMIN: ActionGroup = ActionGroup {
    title: "Administração do Sistema",
    actions: &[
        Action {
            id: "hardinfo",
            label: "Gerenciador de Dispositivos (hardinfo)",
            icon: "hardinfo2",
            kind: ActionKind::FirstAvailable {
                programs: &["hardinfo2", "hardinfo"],
                missing: "Hardinfo",
            },
        },
        privileged("gparted", "Gerenciamento de Disco (gparted)", "gparted", "gparted"),
        Action {
            id: "sysd-manager",
            label: "Gerenciador de Serviços (sysd)",
            icon: "io.github.plrigaux.sysd-manager",
            kind: ActionKind::Flatpak {
                app_id: "io.github.plrigaux.sysd-manager",
                command: "sysd-manager",
                name: "sysd-manager",
            },
        },
        flatpak(
            "resources",
            "Gerenciador de Tarefas e Recursos",
            "net.nokyan.Resources",
            "resources",
            "Resources",
        ),
        plain("network", "Configurações de Rede", "preferences-system-network", "nm-connection-editor"),
        plain(
            "printers",
            "Gerenciador de Impressoras",
            "preferences-devices-printer",
            "system-config-printer",
        ),
        privileged("timeshift", "Restauração e Backup (timeshift)", "timeshift", "timeshift-launcher"),
        privileged("tuned", "Gerenciamento de Energia (tuned)", "tuned", "/usr/sbin/tuned-gui"),
    ],
};

pub const SECURITY_ADMIN: ActionGroup = ActionGroup {
    title: "Administração da Segurança e Inicialização",
    actions: &[
        privileged("gufw", "Configurações do Firewall", "gufw", "gufw"),
        plain("firetools", "Configurações do Firejail", "firetools", "firetools"),
        privileged("grub-edit", "Editar /etc/default/grub", "kate", "kate /etc/default/grub"),
        plain("grub-customizer", "Personalização do GRUB", "grub-customizer", "grub-customizer"),
    ],
};

pub const FLATPAK_ADMIN: ActionGroup = ActionGroup {
    title: "Administração de Flatpaks",
    actions: &[
        flatpak(
            "warehouse",
            "Gerenciador de Pacotes (Warehouse)",
            "io.github.flattool.Warehouse",
            "warehouse",
            "Warehouse",
        ),
        plain(
            "flatseal",
            "Gerenciador de Permissões (Flatseal)",
            "com.github.tchx84.Flatseal",
            "com.github.tchx84.Flatseal",
        ),
        flatpak(
            "flatsweep",
            "Limpeza de Pacotes Residuais (Flatsweep)",
            "io.github.giantpinkrobots.flatsweep",
            "flatsweep",
            "Flatsweep",
        ),
        flatpak(
            "linux-assistant",
            "Assistente do Sistema (Linux Assistant)",
            "io.github.jean28518.Linux-Assistant",
            "linux-assistant",
            "Linux Assistant",
        ),
    ],
};

/// All groups in display order
pub const GROUPS: &[ActionGroup] = &[DEBIAN_ADMIN, SYSTEM_ADMIN, SECURITY_ADMIN, FLATPAK_ADMIN];

pub fn all() -> impl Iterator<Item = &'static Action> {
    GROUPS.iter().flat_map(|g| g.actions.iter())
}

pub fn find(id: &str) -> Option<&'static Action> {
    all().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let mut seen = HashSet::new();
        for action in all() {
            assert!(seen.insert(action.id), "duplicate id {}", action.id);
        }
    }

    #[test]
    fn only_apt_actions_are_destructive() {
        let destructive: Vec<_> = all().filter(|a| a.kind.is_destructive()).map(|a| a.id).collect();
        assert_eq!(destructive, ["apt-clean", "apt-autoremove", "apt-fix-broken", "apt-upgrade"]);
    }

    #[test]
    fn finds_by_id() {
        let upgrade = find("apt-upgrade").unwrap();
        assert!(matches!(
            upgrade.kind,
            ActionKind::Terminal { question: "Atualizar todos os pacotes?", .. }
        ));
        assert!(find("nope").is_none());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(find("gparted").unwrap()).unwrap();
        assert_eq!(json["kind"], "privileged");
        assert_eq!(json["command"], "gparted");
        assert_eq!(json["id"], "gparted");
    }
}
