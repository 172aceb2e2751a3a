use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::{
    ast::{AstProvider, ParseDiagnostic, ParseError, TranslationUnit},
    lexical::SourceRemark,
    symbols::{SymbolReport, assemble},
};

/// What the session currently holds.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Ready(Arc<TranslationUnit>),
}

/// Summary of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    pub file_path: String,
    /// Warnings and notes, plus errors clang recovered from.
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Holds the most recently parsed translation unit so it can be queried
/// repeatedly without re-parsing.
///
/// The state slot sits behind a lock: a report never observes a unit that is
/// only half replaced, even with concurrent callers.
pub struct Session {
    provider: Box<dyn AstProvider>,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(provider: impl AstProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            state: RwLock::new(SessionState::Empty),
        }
    }

    /// Parse `source_text` and make it the current unit.
    ///
    /// On failure the previous unit, if any, stays current.
    pub fn parse(
        &self,
        file_path: &str,
        source_text: &str,
    ) -> Result<ParseOutcome, ParseError> {
        let unit = match self.provider.parse(file_path, source_text) {
            Ok(unit) => unit,
            Err(error) => {
                warn!("[session] parse of {file_path} failed: {error}");
                return Err(error);
            },
        };

        let outcome = ParseOutcome {
            file_path: file_path.to_string(),
            diagnostics: unit.diagnostics().to_vec(),
        };

        let previous = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *state, SessionState::Ready(Arc::new(unit)))
        };
        // Drop the old unit outside the lock.
        drop(previous);

        info!("[session] parsed {file_path} ({} diagnostics)", outcome.diagnostics.len());
        Ok(outcome)
    }

    pub fn report(&self) -> SymbolReport {
        assemble(self.current().as_deref())
    }

    pub fn comments(&self) -> Vec<SourceRemark> {
        self.current().map(|unit| unit.comments()).unwrap_or_default()
    }

    pub fn preprocessor_statements(&self) -> Vec<SourceRemark> {
        self.current().map(|unit| unit.preprocessor_statements()).unwrap_or_default()
    }

    pub fn is_ready(&self) -> bool {
        self.current().is_some()
    }

    /// Path of the current unit.
    pub fn current_file(&self) -> Option<String> {
        self.current().map(|unit| unit.file_path().to_string())
    }

    pub fn state(&self) -> SessionState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn current(&self) -> Option<Arc<TranslationUnit>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            SessionState::Empty => None,
            SessionState::Ready(unit) => Some(Arc::clone(unit)),
        }
    }
}
