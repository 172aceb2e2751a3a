use std::collections::HashMap;

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 25333;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(v) = patch.host {
            self.host = v;
        }
        if let Some(v) = patch.port {
            self.port = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.host = self.host.trim().to_string();
        if self.host.is_empty() {
            self.host = DEFAULT_HOST.to_string();
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct ServerSettingsPatch {
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}
