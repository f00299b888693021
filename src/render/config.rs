//! Where rendered plots go.
use super::RenderResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options shared by all the renderers.
///
/// # Examples
///
/// ```rust
/// use sounding_thermo::RenderConfig;
///
/// let config = RenderConfig::from_toml_str("output_dir = \"figures/2014-02-14\"").unwrap();
/// assert_eq!(config.output_dir().to_str(), Some("figures/2014-02-14"));
/// assert!(config.create_dir());
///
/// let config = RenderConfig::default();
/// assert_eq!(config.output_dir().to_str(), Some("plots"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory every plot is written into.
    output_dir: PathBuf,
    /// Create the output directory, and any missing parents, before writing.
    create_dir: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("plots"),
            create_dir: true,
        }
    }
}

impl RenderConfig {
    /// Create a configuration that writes into `output_dir`.
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Builder method to turn creating the output directory on or off.
    pub fn with_create_dir(self, create_dir: bool) -> Self {
        Self { create_dir, ..self }
    }

    /// Parse a configuration from TOML, missing keys take their default values.
    pub fn from_toml_str(src: &str) -> RenderResult<Self> {
        Ok(toml::from_str(src)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    /// The directory plots are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether the output directory is created when it is missing.
    pub fn create_dir(&self) -> bool {
        self.create_dir
    }

    /// Full path for `file_name`, creating the output directory if configured to.
    pub(crate) fn output_path(&self, file_name: &Path) -> RenderResult<PathBuf> {
        if self.create_dir {
            std::fs::create_dir_all(&self.output_dir)?;
        }

        Ok(self.output_dir.join(file_name))
    }
}
