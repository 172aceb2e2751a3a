//! Lexical listings of source text the AST does not keep: comments and
//! preprocessor directives.

pub mod lexer;
mod listing;

pub use lexer::{Lexeme, Lexer, TokenKind};
pub use listing::{SourceRemark, comments, preprocessor_statements};
