pub mod ast;
pub mod batch;
pub mod config;
pub mod gateway;
pub mod lexical;
pub mod session;
pub mod symbols;

pub use ast::{AstProvider, ClangAstProvider, ParseDiagnostic, ParseError, TranslationUnit};
pub use config::Settings;
pub use gateway::QueryGateway;
pub use session::{ParseOutcome, Session, SessionState};
pub use symbols::{FunctionDescriptor, SymbolReport, VariableDescriptor, assemble};
