use std::{fmt, process::Command};

/// The JS package managers the install step knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Yarn,
    Cnpm,
    Npm,
}
impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            Self::Yarn => "yarn",
            Self::Cnpm => "cnpm",
            Self::Npm => "npm",
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.program())
    }
}
impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

fn probe(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

pub fn should_use_yarn() -> bool {
    probe("yarn")
}

pub fn should_use_cnpm() -> bool {
    probe("cnpm")
}

/// Install-command policy: yarn when preferred, else cnpm when available,
/// else npm. Exactly one manager is ever selected.
pub fn select(prefer_yarn: bool, cnpm_available: bool) -> PackageManager {
    if prefer_yarn {
        PackageManager::Yarn
    } else if cnpm_available {
        PackageManager::Cnpm
    } else {
        PackageManager::Npm
    }
}

/// Version of this tool, used to pick the matching bundled lockfile.
pub fn pkg_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yarn_wins_when_preferred() {
        assert_eq!(select(true, false), PackageManager::Yarn);
        assert_eq!(select(true, true), PackageManager::Yarn);
    }

    #[test]
    fn cnpm_is_the_secondary_choice() {
        assert_eq!(select(false, true), PackageManager::Cnpm);
    }

    #[test]
    fn npm_is_the_fallback() {
        assert_eq!(select(false, false), PackageManager::Npm);
    }

    #[test]
    fn probing_a_missing_program_reports_unavailable() {
        assert!(!probe("definitely-not-a-real-package-manager"));
    }

    #[test]
    fn install_command_names_the_program() {
        assert_eq!(PackageManager::Yarn.install_command(), "yarn install");
        assert_eq!(PackageManager::Npm.install_command(), "npm install");
    }
}
