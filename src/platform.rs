//! Host distribution detection.
use std::fmt;
use std::path::Path;

use crate::error::PlatformError;

/// Conventional location of the OS identification file.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Package-manager backend used for every install and upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Fedora.
    Dnf,
    /// RHEL and CentOS.
    Yum,
    /// Ubuntu and Debian.
    AptGet,
}

impl PackageManager {
    /// Executable name of the backend.
    #[must_use]
    pub const fn binary(self) -> &'static str {
        match self {
            Self::Dnf => "dnf",
            Self::Yum => "yum",
            Self::AptGet => "apt-get",
        }
    }

    /// Map an os-release `ID` to its backend. The table is fixed.
    #[must_use]
    pub fn from_os_id(id: &str) -> Option<Self> {
        match id {
            "fedora" => Some(Self::Dnf),
            "rhel" | "centos" => Some(Self::Yum),
            "ubuntu" | "debian" => Some(Self::AptGet),
            _ => None,
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Detected host information, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// The os-release `ID` that was matched.
    pub os_id: String,
    /// Backend derived from `os_id`.
    pub package_manager: PackageManager,
}

impl Platform {
    /// Detect the host from [`OS_RELEASE_PATH`].
    ///
    /// # Errors
    ///
    /// See [`Platform::detect_from`].
    pub fn detect() -> Result<Self, PlatformError> {
        Self::detect_from(Path::new(OS_RELEASE_PATH))
    }

    /// Detect the host from an os-release style file.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unreadable`] if the file cannot be read and
    /// [`PlatformError::UnsupportedDistribution`] if it has no `ID` or the
    /// ID is not in the supported table.
    pub fn detect_from(path: &Path) -> Result<Self, PlatformError> {
        let content = std::fs::read_to_string(path).map_err(|source| PlatformError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_os_release(&content)
    }

    /// Resolve the platform from os-release content.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::UnsupportedDistribution`] if `ID` is absent
    /// or unmapped.
    pub fn from_os_release(content: &str) -> Result<Self, PlatformError> {
        let os_id = os_release_field(content, "ID").unwrap_or_default();
        let package_manager = PackageManager::from_os_id(&os_id)
            .ok_or_else(|| PlatformError::UnsupportedDistribution { id: os_id.clone() })?;
        Ok(Self {
            os_id,
            package_manager,
        })
    }
}

/// Return the unquoted value of `key` from os-release content.
///
/// Blank lines and `#` comments are ignored. Later assignments win, as
/// they would when the file is sourced by a shell.
#[must_use]
pub fn os_release_field(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .filter(|(k, _)| k.trim() == key)
        .map(|(_, v)| unquote(v.trim()).to_string())
        .next_back()
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| {
            value
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(value)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn os_release(id: &str) -> String {
        format!("NAME=\"Some Linux\"\nID={id}\nVERSION_ID=\"1\"\n")
    }

    #[test]
    fn supported_ids_map_to_documented_backends() {
        let cases = [
            ("fedora", PackageManager::Dnf),
            ("rhel", PackageManager::Yum),
            ("centos", PackageManager::Yum),
            ("ubuntu", PackageManager::AptGet),
            ("debian", PackageManager::AptGet),
        ];
        for (id, expected) in cases {
            let platform = Platform::from_os_release(&os_release(id)).unwrap();
            assert_eq!(platform.package_manager, expected, "id {id}");
            assert_eq!(platform.os_id, id);
        }
    }

    #[test]
    fn unsupported_id_fails_naming_identifier() {
        let err = Platform::from_os_release(&os_release("arch")).unwrap_err();
        assert!(
            matches!(&err, PlatformError::UnsupportedDistribution { id } if id == "arch"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn missing_id_fails() {
        let err = Platform::from_os_release("NAME=\"Mystery\"\n").unwrap_err();
        assert!(matches!(
            err,
            PlatformError::UnsupportedDistribution { ref id } if id.is_empty()
        ));
    }

    #[test]
    fn quoted_id_is_unquoted() {
        let platform = Platform::from_os_release("ID=\"centos\"\n").unwrap();
        assert_eq!(platform.package_manager, PackageManager::Yum);
        let platform = Platform::from_os_release("ID='debian'\n").unwrap();
        assert_eq!(platform.package_manager, PackageManager::AptGet);
    }

    #[test]
    fn id_like_does_not_shadow_id() {
        let content = "ID_LIKE=\"rhel fedora\"\nID=ubuntu\n";
        assert_eq!(os_release_field(content, "ID").as_deref(), Some("ubuntu"));
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let content = "# ID=fedora\n\nID=debian\n";
        assert_eq!(os_release_field(content, "ID").as_deref(), Some("debian"));
    }

    #[test]
    fn detect_from_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = Platform::detect_from(&dir.path().join("os-release")).unwrap_err();
        assert!(matches!(err, PlatformError::Unreadable { .. }));
    }

    #[test]
    fn detect_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("os-release");
        std::fs::write(&path, os_release("fedora")).unwrap();
        let platform = Platform::detect_from(&path).unwrap();
        assert_eq!(platform.package_manager, PackageManager::Dnf);
    }

    #[test]
    fn package_manager_display() {
        assert_eq!(PackageManager::Dnf.to_string(), "dnf");
        assert_eq!(PackageManager::Yum.to_string(), "yum");
        assert_eq!(PackageManager::AptGet.to_string(), "apt-get");
    }
}
