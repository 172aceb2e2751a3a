//! Compiler frontend access: the clang AST model and the providers that build it.

pub mod clang_nodes;
pub mod diagnostics;
pub mod provider;

pub use clang_nodes::{Clang, Node};
pub use diagnostics::{ParseDiagnostic, Severity};
pub use provider::{AstProvider, ClangAstProvider, ParseError, STDIN_FILE_NAME, TranslationUnit};
