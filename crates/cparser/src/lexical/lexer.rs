use logos::Logos;

/// Token kinds needed to find comments and preprocessor directives.
///
/// Strings and character literals are lexed so that `//`, `/*` or `#`
/// inside them are not mistaken for comments or directives.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = ())]
pub enum TokenKind {
    #[regex(r"[ \t\r\f\v]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    /// Runs to the end of the line, following backslash continuations.
    #[regex(r"//([^\\\n]|\\[^\n]|\\\r?\n)*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", allow_greedy = true)]
    BlockComment,

    /// A `#` and the rest of its line, including backslash continuations.
    #[regex(r"#([^\\\n]|\\[^\n]|\\\r?\n)*", allow_greedy = true)]
    Directive,

    #[regex(r#""([^"\\\n]|\\[\s\S])*""#, allow_greedy = true)]
    String,

    #[regex(r#"R"([^"]*)""#, allow_greedy = true)]
    RawString,

    #[regex(r#"'([^'\\\n]|\\[\s\S])*'"#, allow_greedy = true)]
    Char,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9a-zA-Z_.']*")]
    Number,

    #[regex(r#"[^ \t\r\f\v\n"'#a-zA-Z0-9_]"#)]
    Punct,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

/// One lexed slice of the source.
///
/// `kind` is `None` for input the lexer does not recognize, such as an
/// unterminated string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub kind: Option<TokenKind>,
    pub text: &'a str,
    /// 1-based line on which the lexeme starts.
    pub line: u32,
}

/// A lexer that wraps `logos::Lexer` and tracks line numbers.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
            line: 1,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Lexeme<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token_result = self.inner.next()?;
        let text = self.inner.slice();
        let line = self.line;
        self.line += text.bytes().filter(|&b| b == b'\n').count() as u32;

        Some(Lexeme {
            kind: token_result.ok(),
            text,
            line,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src/lexical/lexer_tests.rs"]
mod tests;
