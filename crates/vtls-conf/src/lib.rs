//! Settings for the template intelligence bridge.
//!
//! Settings are layered from a user-level config file and project-level
//! `vtls.toml` / `.vtls.toml` files, later sources overriding earlier ones.

mod casing;

use std::path::Path;

use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub use casing::AttrCasing;
pub use casing::NameCasing;
pub use casing::TagCasing;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub casing: NameCasing,
    pub completion: CompletionSettings,
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(default)]
pub struct CompletionSettings {
    /// Offer sibling documents as auto-importable tags while completing.
    pub auto_import_component: bool,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            auto_import_component: true,
        }
    }
}

impl Settings {
    pub fn new(project_root: &Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("com.github", "vtls", "vtls")
            .map(|proj_dirs| proj_dirs.config_dir().join("vtls.toml"));

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    fn load_from_paths(
        project_root: &Path,
        user_config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            File::from(project_root.join(".vtls.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("vtls.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        let config = builder.build()?;
        let settings = config.try_deserialize()?;
        Ok(settings)
    }
}
