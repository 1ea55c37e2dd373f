use logos::Logos;

/// Represents a lexical token inside captured literal text.
///
/// The scanner hands the raw text of a bracketed subexpression to the
/// materializer, which reads it with this lexer. Whitespace is skipped.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum LiteralToken {
    /// Numeric literal tokens, such as `3.14`, `-0.5` or `2.1e-10`.
    #[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"-?[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42` or `-7`.
    #[regex(r"-?[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `null`
    #[token("null")]
    Null,
    /// `undefined`
    #[token("undefined")]
    Undefined,
    /// Quoted strings with their quotes removed and escapes resolved.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string)]
    #[regex(r"'([^'\\]|\\.)*'", parse_string)]
    Str(String),
    /// Identifier tokens; names such as `x` or `$el`.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<LiteralToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None`, and so a lexing error, if the literal overflows `i64`.
fn parse_integer(lex: &logos::Lexer<LiteralToken>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<LiteralToken>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Strips the quotes from a string literal and resolves its escapes.
fn parse_string(lex: &logos::Lexer<LiteralToken>) -> String {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}

/// Resolves backslash escapes.
///
/// `\n`, `\t` and `\r` become control characters; any other escaped
/// character stands for itself, which covers `\\`, `\"` and `\'`.
///
/// # Example
/// ```
/// use shellexpr::interpreter::lexer::unescape;
///
/// assert_eq!(unescape(r#"a\"b\n"#), "a\"b\n");
/// assert_eq!(unescape(r"c:\\dir"), r"c:\dir");
/// ```
#[must_use]
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
