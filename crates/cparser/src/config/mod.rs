//! Settings for the extractor, split into one file per category.
//!
//! [`Settings`] aggregates all categories. A `cparser.toml` file is read into
//! partial `*Patch` structs that are layered over the defaults, so a file only
//! needs the keys it changes and unknown keys are ignored.

pub(crate) mod compiler;
pub(crate) mod logging;
pub(crate) mod server;

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

pub use compiler::{CompilerSettings, DEFAULT_COMPILER_COMMAND, DEFAULT_LANGUAGE};
use compiler::CompilerSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use logging::LoggingSettingsPatch;
use serde::Deserialize;
pub use server::{DEFAULT_HOST, DEFAULT_PORT, ServerSettings};
use server::ServerSettingsPatch;

pub const CONFIG_FILENAME: &str = "cparser.toml";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub compiler: CompilerSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        settings.merge_toml_str(content)?;
        Ok(settings)
    }

    pub fn merge_toml_str(
        &mut self,
        content: &str,
    ) -> Result<(), ConfigError> {
        let patch: SettingsPatch = toml::from_str(content).map_err(|error| ConfigError::Invalid {
            path: None,
            reason: error.to_string(),
        })?;
        self.apply_patch(patch);
        self.normalize();
        Ok(())
    }

    /// Load settings from `explicit` or, failing that, from the nearest
    /// `cparser.toml` above `start`.
    ///
    /// An explicitly named file must exist and parse. A discovered file that
    /// does not parse is an error too; no file at all yields the defaults.
    pub fn load(
        explicit: Option<&Path>,
        start: &Path,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match find_config_file(start) {
                Some(path) => path,
                None => return Ok((Self::default(), None)),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|error| ConfigError::Unreadable {
            path: path.clone(),
            reason: error.to_string(),
        })?;
        let settings = Self::from_toml_str(&content).map_err(|error| error.with_path(&path))?;
        Ok((settings, Some(path)))
    }

    fn apply_patch(
        &mut self,
        patch: SettingsPatch,
    ) {
        if let Some(p) = patch.compiler {
            self.compiler.apply_patch(p);
        }
        if let Some(p) = patch.server {
            self.server.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.compiler.normalize();
        self.server.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct SettingsPatch {
    compiler: Option<CompilerSettingsPatch>,
    server: Option<ServerSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, toml::Value>,
}

/// Walks parent directories from `start` looking for `cparser.toml`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Unreadable {
        path: PathBuf,
        reason: String,
    },
    Invalid {
        path: Option<PathBuf>,
        reason: String,
    },
}

impl ConfigError {
    fn with_path(
        self,
        path: &Path,
    ) -> Self {
        match self {
            Self::Invalid {
                reason,
                ..
            } => Self::Invalid {
                path: Some(path.to_path_buf()),
                reason,
            },
            other => other,
        }
    }
}

impl Display for ConfigError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Unreadable {
                path,
                reason,
            } => write!(f, "cannot read {}: {reason}", path.display()),
            Self::Invalid {
                path: Some(path),
                reason,
            } => write!(f, "invalid configuration in {}: {reason}", path.display()),
            Self::Invalid {
                path: None,
                reason,
            } => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
