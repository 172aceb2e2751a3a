use super::*;

fn kinds(input: &str) -> Vec<(Option<TokenKind>, &str)> {
    Lexer::new(input).map(|lexeme| (lexeme.kind, lexeme.text)).collect()
}

#[test]
fn test_comments() {
    assert_eq!(
        kinds("a // tail\n/* block */"),
        vec![
            (Some(TokenKind::Ident), "a"),
            (Some(TokenKind::Whitespace), " "),
            (Some(TokenKind::LineComment), "// tail"),
            (Some(TokenKind::Newline), "\n"),
            (Some(TokenKind::BlockComment), "/* block */"),
        ]
    );
}

#[test]
fn test_directive_with_continuation() {
    assert_eq!(
        kinds("#define TWICE(x) \\\n  ((x) * 2)\nint"),
        vec![
            (Some(TokenKind::Directive), "#define TWICE(x) \\\n  ((x) * 2)"),
            (Some(TokenKind::Newline), "\n"),
            (Some(TokenKind::Ident), "int"),
        ]
    );
}

#[test]
fn test_line_comment_with_continuation() {
    assert_eq!(
        kinds("// first \\\n   second\nint"),
        vec![
            (Some(TokenKind::LineComment), "// first \\\n   second"),
            (Some(TokenKind::Newline), "\n"),
            (Some(TokenKind::Ident), "int"),
        ]
    );
}

#[test]
fn test_comment_markers_inside_literals() {
    assert_eq!(
        kinds(r#""// not a comment" '#'"#),
        vec![
            (Some(TokenKind::String), "\"// not a comment\""),
            (Some(TokenKind::Whitespace), " "),
            (Some(TokenKind::Char), "'#'"),
        ]
    );
}

#[test]
fn test_punctuation_and_numbers() {
    assert_eq!(
        kinds("x/2;"),
        vec![
            (Some(TokenKind::Ident), "x"),
            (Some(TokenKind::Punct), "/"),
            (Some(TokenKind::Number), "2"),
            (Some(TokenKind::Punct), ";"),
        ]
    );
}

#[test]
fn test_line_numbers() {
    let lines: Vec<(&str, u32)> = Lexer::new("/* one\ntwo */ a\nb")
        .filter(|lexeme| lexeme.kind == Some(TokenKind::Ident) || lexeme.kind == Some(TokenKind::BlockComment))
        .map(|lexeme| (lexeme.text, lexeme.line))
        .collect();
    assert_eq!(lines, vec![("/* one\ntwo */", 1), ("a", 2), ("b", 3)]);
}

#[test]
fn test_unterminated_string_is_unrecognized() {
    let lexemes: Vec<_> = Lexer::new("\"open").collect();
    assert_eq!(lexemes[0].kind, None);
}
