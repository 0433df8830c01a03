//! Recognized packit configuration file names.

use std::path::Path;

/// A configuration file name packit looks for in a repository root.
///
/// Variants are declared in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFileName {
    /// `.packit.yaml`
    HiddenYaml,
    /// `.packit.yml`
    HiddenYml,
    /// `.packit.json`
    HiddenJson,
    /// `packit.yaml`
    Yaml,
    /// `packit.yml`
    Yml,
    /// `packit.json`
    Json,
}

/// All recognized config file names, highest priority first.
pub const CONFIG_FILE_NAMES: [ConfigFileName; 6] = [
    ConfigFileName::HiddenYaml,
    ConfigFileName::HiddenYml,
    ConfigFileName::HiddenJson,
    ConfigFileName::Yaml,
    ConfigFileName::Yml,
    ConfigFileName::Json,
];

impl ConfigFileName {
    /// Get the file name as it appears on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HiddenYaml => ".packit.yaml",
            Self::HiddenYml => ".packit.yml",
            Self::HiddenJson => ".packit.json",
            Self::Yaml => "packit.yaml",
            Self::Yml => "packit.yml",
            Self::Json => "packit.json",
        }
    }
}

impl AsRef<Path> for ConfigFileName {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ConfigFileName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ConfigFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
