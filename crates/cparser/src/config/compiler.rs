use std::collections::HashMap;

use serde::Deserialize;

pub const DEFAULT_COMPILER_COMMAND: &str = "clang";
pub const DEFAULT_LANGUAGE: &str = "c++";

#[derive(Debug, Clone, PartialEq)]
pub struct CompilerSettings {
    /// Frontend executable.
    pub command: String,
    /// Value passed to `-x`.
    pub language: String,
    /// Value passed to `-std=`, if any.
    pub standard: Option<String>,
    pub include_paths: Vec<String>,
    pub extra_flags: Vec<String>,
    /// Treat compiler errors as parse failures instead of extracting from
    /// the partial AST.
    pub strict: bool,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMPILER_COMMAND.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            standard: None,
            include_paths: Vec::new(),
            extra_flags: Vec::new(),
            strict: false,
        }
    }
}

impl CompilerSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: CompilerSettingsPatch,
    ) {
        if let Some(v) = patch.command {
            self.command = v;
        }
        if let Some(v) = patch.language {
            self.language = v;
        }
        if let Some(v) = patch.standard {
            self.standard = Some(v);
        }
        if let Some(v) = patch.include_paths {
            self.include_paths = v;
        }
        if let Some(v) = patch.extra_flags {
            self.extra_flags = v;
        }
        if let Some(v) = patch.strict {
            self.strict = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.command = self.command.trim().to_string();
        if self.command.is_empty() {
            self.command = DEFAULT_COMPILER_COMMAND.to_string();
        }
        self.language = self.language.trim().to_ascii_lowercase();
        if self.language.is_empty() {
            self.language = DEFAULT_LANGUAGE.to_string();
        }
        self.standard = self.standard.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        self.include_paths =
            self.include_paths.iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect();
        self.extra_flags = self.extra_flags.iter().map(|f| f.trim().to_string()).filter(|f| !f.is_empty()).collect();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct CompilerSettingsPatch {
    pub(crate) command: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) standard: Option<String>,
    pub(crate) include_paths: Option<Vec<String>>,
    pub(crate) extra_flags: Option<Vec<String>>,
    pub(crate) strict: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}
