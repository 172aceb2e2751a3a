use std::{
    fmt::{Display, Formatter},
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

use tracing::{debug, warn};

use crate::{
    ast::{
        clang_nodes::Node,
        diagnostics::{ParseDiagnostic, parse_diagnostics},
    },
    config::CompilerSettings,
    lexical::{self, SourceRemark},
};

/// File name clang reports for a translation unit read from stdin.
pub const STDIN_FILE_NAME: &str = "<stdin>";

/// The capability the extractor needs from a compiler frontend.
///
/// Any frontend that produces a resolved clang-style AST can fill this role.
/// Closures with the same signature implement it too, which keeps tests free
/// of a real compiler.
pub trait AstProvider: Send + Sync {
    fn parse(
        &self,
        file_path: &str,
        source_text: &str,
    ) -> Result<TranslationUnit, ParseError>;
}

impl<F> AstProvider for F
where
    F: Fn(&str, &str) -> Result<TranslationUnit, ParseError> + Send + Sync,
{
    fn parse(
        &self,
        file_path: &str,
        source_text: &str,
    ) -> Result<TranslationUnit, ParseError> {
        self(file_path, source_text)
    }
}

/// A parsed translation unit: the clang AST plus the text it was built from.
#[derive(Debug)]
pub struct TranslationUnit {
    file_path: String,
    source: String,
    /// The file name clang used for the main file inside the AST.
    main_file: String,
    root: Node,
    diagnostics: Vec<ParseDiagnostic>,
}

impl TranslationUnit {
    /// Build a translation unit from clang's `-ast-dump=json` output.
    pub fn from_ast_json(
        file_path: impl Into<String>,
        source: impl Into<String>,
        main_file: impl Into<String>,
        ast_json: &str,
    ) -> Result<Self, ParseError> {
        let root: Node = serde_json::from_str(ast_json).map_err(|error| ParseError::InvalidAst {
            reason: error.to_string(),
        })?;

        Ok(Self {
            file_path: file_path.into(),
            source: source.into(),
            main_file: main_file.into(),
            root,
            diagnostics: Vec::new(),
        })
    }

    pub fn with_diagnostics(
        mut self,
        diagnostics: Vec<ParseDiagnostic>,
    ) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn main_file(&self) -> &str {
        &self.main_file
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Non-fatal compiler diagnostics produced while parsing.
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    pub fn comments(&self) -> Vec<SourceRemark> {
        lexical::comments(&self.source)
    }

    pub fn preprocessor_statements(&self) -> Vec<SourceRemark> {
        lexical::preprocessor_statements(&self.source)
    }
}

#[derive(Debug)]
pub enum ParseError {
    Launch {
        command: String,
        reason: String,
    },
    Failed {
        status: Option<i32>,
        diagnostics: Vec<ParseDiagnostic>,
    },
    InvalidAst {
        reason: String,
    },
}

impl ParseError {
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        match self {
            Self::Failed {
                diagnostics,
                ..
            } => diagnostics,
            Self::Launch {
                ..
            }
            | Self::InvalidAst {
                ..
            } => &[],
        }
    }
}

impl Display for ParseError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Launch {
                command,
                reason,
            } => write!(f, "failed to launch {command}: {reason}"),
            Self::Failed {
                status,
                diagnostics,
            } => {
                let errors = diagnostics.iter().filter(|d| d.severity.is_error()).count();
                match status {
                    Some(code) => write!(f, "parse failed with exit status {code} ({errors} error(s))")?,
                    None => write!(f, "parse failed ({errors} error(s))")?,
                }
                if let Some(first) = diagnostics.iter().find(|d| d.severity.is_error()) {
                    write!(f, ": {first}")?;
                }
                Ok(())
            },
            Self::InvalidAst {
                reason,
            } => write!(f, "compiler produced an unusable AST: {reason}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Runs clang's JSON AST dump on the source text.
#[derive(Debug, Clone, Default)]
pub struct ClangAstProvider {
    settings: CompilerSettings,
}

impl ClangAstProvider {
    pub fn new(settings: CompilerSettings) -> Self {
        Self {
            settings,
        }
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Arguments for one AST dump. The source is piped through stdin, so
    /// the directory of `file_path` is added to the search path to keep
    /// relative includes resolvable.
    pub fn ast_dump_args(
        &self,
        file_path: &str,
    ) -> Vec<String> {
        let mut args = vec![
            "-x".to_string(),
            self.settings.language.clone(),
            "-fsyntax-only".to_string(),
            "-fno-color-diagnostics".to_string(),
            "-Xclang".to_string(),
            "-ast-dump=json".to_string(),
        ];

        if let Some(standard) = &self.settings.standard {
            args.push(format!("-std={standard}"));
        }

        if let Some(parent) = Path::new(file_path).parent().filter(|p| !p.as_os_str().is_empty()) {
            args.push("-I".to_string());
            args.push(parent.display().to_string());
        }
        for path in &self.settings.include_paths {
            args.push("-I".to_string());
            args.push(path.clone());
        }

        args.extend(self.settings.extra_flags.iter().cloned());
        args.push("-".to_string());
        args
    }
}

impl AstProvider for ClangAstProvider {
    fn parse(
        &self,
        file_path: &str,
        source_text: &str,
    ) -> Result<TranslationUnit, ParseError> {
        let command = &self.settings.command;
        let args = self.ast_dump_args(file_path);
        debug!("AST dump: {command} {}", args.join(" "));

        let output = run_with_stdin(command, &args, source_text)?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut diagnostics = parse_diagnostics(&stderr);
        for diagnostic in &mut diagnostics {
            if diagnostic.file == STDIN_FILE_NAME {
                diagnostic.file = file_path.to_string();
            }
        }
        let has_errors = diagnostics.iter().any(|d| d.severity.is_error());
        for diagnostic in diagnostics.iter().filter(|d| d.severity.is_error()) {
            warn!("[ast-dump] compiler error: {diagnostic}");
        }

        if has_errors && self.settings.strict {
            return Err(ParseError::Failed {
                status: output.status.code(),
                diagnostics,
            });
        }
        if !output.status.success() {
            debug!("[ast-dump] exited with {} (partial AST may still be usable)", output.status);
        }

        let stdout = String::from_utf8(output.stdout).map_err(|error| ParseError::InvalidAst {
            reason: format!("AST dump is not valid UTF-8: {error}"),
        })?;
        if !stdout.trim_start().starts_with('{') {
            return Err(ParseError::Failed {
                status: output.status.code(),
                diagnostics,
            });
        }

        debug!("[ast-dump] produced {} bytes of JSON for {file_path}", stdout.len());

        let unit = TranslationUnit::from_ast_json(file_path, source_text, STDIN_FILE_NAME, &stdout)?;
        Ok(unit.with_diagnostics(diagnostics))
    }
}

fn run_with_stdin(
    command: &str,
    args: &[String],
    input: &str,
) -> Result<Output, ParseError> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| ParseError::Launch {
            command: command.to_string(),
            reason: match error.kind() {
                std::io::ErrorKind::NotFound => "command not found".to_string(),
                _ => error.to_string(),
            },
        })?;

    // Feed stdin from a second thread so a large AST on stdout cannot
    // deadlock against a source that has not been fully written yet.
    let stdin = child.stdin.take();
    let output = std::thread::scope(|scope| {
        if let Some(mut stdin) = stdin {
            scope.spawn(move || {
                if let Err(error) = stdin.write_all(input.as_bytes()) {
                    debug!("[ast-dump] failed to stream source to {command}: {error}");
                }
            });
        }
        child.wait_with_output()
    });

    output.map_err(|error| ParseError::Launch {
        command: command.to_string(),
        reason: error.to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/src/ast/provider_tests.rs"]
mod tests;
