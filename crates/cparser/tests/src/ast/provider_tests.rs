use super::*;
use crate::ast::diagnostics::Severity;

fn provider_with(settings: CompilerSettings) -> ClangAstProvider {
    ClangAstProvider::new(settings)
}

#[test]
fn ast_dump_args_read_cpp_from_stdin() {
    let provider = provider_with(CompilerSettings::default());
    let args = provider.ast_dump_args("main.c");

    assert_eq!(&args[..2], ["-x", "c++"]);
    assert!(args.contains(&"-fsyntax-only".to_string()));
    assert!(args.windows(2).any(|w| w == ["-Xclang", "-ast-dump=json"]));
    assert_eq!(args.last().map(String::as_str), Some("-"));
    assert!(!args.contains(&"-I".to_string()), "bare file name has no directory to search: {args:?}");
}

#[test]
fn ast_dump_args_include_source_directory_and_settings() {
    let settings = CompilerSettings {
        language: "c".to_string(),
        standard: Some("c11".to_string()),
        include_paths: vec!["/opt/include".to_string()],
        extra_flags: vec!["-DNDEBUG".to_string()],
        ..CompilerSettings::default()
    };
    let args = provider_with(settings).ast_dump_args("src/lib/util.c");

    assert_eq!(&args[..2], ["-x", "c"]);
    assert!(args.contains(&"-std=c11".to_string()));
    let source_dir = args.windows(2).position(|w| w == ["-I", "src/lib"]).expect("source dir include");
    let configured = args.windows(2).position(|w| w == ["-I", "/opt/include"]).expect("configured include");
    assert!(source_dir < configured, "source directory is searched first: {args:?}");
    assert!(args.contains(&"-DNDEBUG".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("-"));
}

#[test]
fn missing_compiler_is_a_launch_error() {
    let provider = provider_with(CompilerSettings {
        command: "cparser-test-no-such-compiler".to_string(),
        ..CompilerSettings::default()
    });
    let error = provider.parse("a.c", "int x;").expect_err("missing compiler must fail");

    match &error {
        ParseError::Launch {
            command,
            ..
        } => assert_eq!(command, "cparser-test-no-such-compiler"),
        other => panic!("expected launch error, got {other:?}"),
    }
    assert!(error.to_string().starts_with("failed to launch cparser-test-no-such-compiler"));
    assert!(error.diagnostics().is_empty());
}

#[test]
fn malformed_ast_json_is_rejected() {
    let error = TranslationUnit::from_ast_json("a.c", "", STDIN_FILE_NAME, "{\"kind\": ").expect_err("truncated");
    assert!(matches!(error, ParseError::InvalidAst { .. }), "got {error:?}");
}

#[test]
fn minimal_ast_json_builds_a_unit() {
    let json = r#"{"id": "0x1", "kind": "TranslationUnitDecl", "loc": {}, "range": {"begin": {}, "end": {}}}"#;
    let unit = TranslationUnit::from_ast_json("a.c", "// empty\n", STDIN_FILE_NAME, json).expect("valid AST");

    assert_eq!(unit.file_path(), "a.c");
    assert_eq!(unit.main_file(), STDIN_FILE_NAME);
    assert!(unit.root().inner.is_empty());
    assert!(unit.diagnostics().is_empty());
    assert_eq!(unit.comments().len(), 1);
}

#[test]
fn failed_error_names_first_error() {
    let error = ParseError::Failed {
        status: Some(1),
        diagnostics: vec![
            ParseDiagnostic {
                file: "a.c".to_string(),
                line: 1,
                column: 1,
                severity: Severity::Warning,
                message: "something minor".to_string(),
            },
            ParseDiagnostic {
                file: "a.c".to_string(),
                line: 2,
                column: 5,
                severity: Severity::Error,
                message: "expected ';'".to_string(),
            },
        ],
    };

    assert_eq!(error.to_string(), "parse failed with exit status 1 (1 error(s)): a.c:2:5: error: expected ';'");
    assert_eq!(error.diagnostics().len(), 2);
}

#[test]
fn closures_act_as_providers() {
    let provider = |path: &str, _source: &str| -> Result<TranslationUnit, ParseError> {
        Err(ParseError::InvalidAst {
            reason: format!("no frontend for {path}"),
        })
    };
    let error = AstProvider::parse(&provider, "x.c", "").expect_err("closure error");
    assert_eq!(error.to_string(), "compiler produced an unusable AST: no frontend for x.c");
}
