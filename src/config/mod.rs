//! The provisioning catalog: every fixed list and URL the steps use.
//!
//! The catalog ships inside the binary (`conf/bootstrap.toml`) so a fresh
//! host needs nothing but the executable.
pub mod toml_loader;

use serde::Deserialize;

use crate::error::ConfigError;

/// The catalog compiled into the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("../../conf/bootstrap.toml");

/// All catalog data consumed by the provisioning steps.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Packages installed when their command is missing.
    pub packages: Packages,
    /// SDK and Node version-manager installers, in run order.
    pub version_managers: Vec<VersionManager>,
    /// Flatpak remote and applications.
    pub flatpak: Flatpak,
    /// Font archives.
    pub fonts: Fonts,
    /// Shell framework, plugins, prompt and rc file.
    pub shell: Shell,
    /// Kernel parameter configuration.
    pub sysctl: Sysctl,
    /// Workspace directories.
    pub workspace: Workspace,
    /// Git configuration seed.
    pub git: Git,
}

/// `[packages]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Packages {
    /// Package names; each doubles as the command probed for presence.
    pub common: Vec<String>,
}

/// `[[version_managers]]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionManager {
    /// Display name.
    pub name: String,
    /// Fetch-and-execute command line.
    pub install: String,
}

/// `[flatpak]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flatpak {
    /// Remote name passed to `flatpak remote-add`.
    pub remote_name: String,
    /// `.flatpakrepo` URL for the remote.
    pub remote_url: String,
    /// Application IDs installed in a single invocation.
    pub apps: Vec<String>,
}

/// `[fonts]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fonts {
    /// Archive URLs; each must end in a file name.
    pub archives: Vec<String>,
}

impl Fonts {
    /// File names the archives are saved under, in catalog order.
    #[must_use]
    pub fn archive_file_names(&self) -> Vec<&str> {
        self.archives
            .iter()
            .filter_map(|url| archive_file_name(url))
            .collect()
    }
}

/// `[shell]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Shell {
    /// Oh-My-Zsh installer script URL.
    pub framework_installer: String,
    /// Prompt tool installer script URL.
    pub prompt_installer: String,
    /// Replacement `.zshrc` URL.
    pub zshrc_url: String,
    /// Plugin repositories cloned into the framework's custom directory.
    pub plugins: Vec<Plugin>,
}

/// `[[shell.plugins]]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plugin {
    /// Directory name under `custom/plugins`.
    pub name: String,
    /// Git URL.
    pub repository: String,
}

/// `[sysctl]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sysctl {
    /// Replacement `/etc/sysctl.conf` URL.
    pub url: String,
}

/// `[workspace]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Workspace {
    /// Directories relative to `$HOME`.
    pub directories: Vec<String>,
}

/// `[git]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Git {
    /// Replacement `~/.gitconfig` URL.
    pub gitconfig_url: String,
}

impl Config {
    /// Load the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog fails to parse or validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_toml(EMBEDDED_CATALOG, "bootstrap.toml")
    }

    /// Parse and validate a catalog from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSyntax`] for malformed TOML and
    /// [`ConfigError::InvalidEntry`] for entries the steps cannot use.
    pub fn from_toml(content: &str, source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml_loader::parse(content, source)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = self
            .fonts
            .archives
            .iter()
            .find(|url| archive_file_name(url).is_none())
        {
            return Err(invalid("fonts", format!("'{url}' has no file name")));
        }
        if let Some(dir) = self
            .workspace
            .directories
            .iter()
            .find(|d| d.is_empty() || d.starts_with('/'))
        {
            return Err(invalid(
                "workspace",
                format!("'{dir}' must be a non-empty path relative to $HOME"),
            ));
        }
        if let Some(plugin) = self
            .shell
            .plugins
            .iter()
            .find(|p| p.name.is_empty() || p.name.contains('/'))
        {
            return Err(invalid(
                "shell.plugins",
                format!("'{}' is not a valid directory name", plugin.name),
            ));
        }
        Ok(())
    }
}

fn invalid(section: &str, message: String) -> ConfigError {
    ConfigError::InvalidEntry {
        section: section.to_string(),
        message,
    }
}

/// The last path segment of `url`, if it is non-empty.
#[must_use]
pub fn archive_file_name(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|name| !name.is_empty())
}
