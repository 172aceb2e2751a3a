use super::*;

#[test]
fn parses_error_and_warning_lines() {
    let stderr = "\
<stdin>:3:9: error: use of undeclared identifier 'y'
    int x = y;
            ^
<stdin>:1:5: warning: unused variable 'z' [-Wunused-variable]
1 warning and 1 error generated.
";
    let diagnostics = parse_diagnostics(stderr);
    assert_eq!(diagnostics.len(), 2);

    assert_eq!(diagnostics[0].file, "<stdin>");
    assert_eq!(diagnostics[0].line, 3);
    assert_eq!(diagnostics[0].column, 9);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].message, "use of undeclared identifier 'y'");

    assert_eq!(diagnostics[1].severity, Severity::Warning);
    assert_eq!(diagnostics[1].message, "unused variable 'z' [-Wunused-variable]");
}

#[test]
fn fatal_errors_count_as_errors() {
    let diagnostics = parse_diagnostics("<stdin>:1:10: fatal error: 'missing.h' file not found");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Fatal);
    assert!(diagnostics[0].severity.is_error());
    assert!(!Severity::Note.is_error());
}

#[test]
fn display_matches_compiler_format() {
    let line = "src/main.c:12:4: note: previous declaration is here";
    let diagnostics = parse_diagnostics(line);
    assert_eq!(diagnostics[0].to_string(), line);
}

#[test]
fn ignores_non_diagnostic_output() {
    assert!(parse_diagnostics("clang: error: no input files\n2 errors generated.\n").is_empty());
}
