//! Tokenizer for Go type expressions.

use logos::Logos;

/// Token of a type expression.
///
/// Identifiers may contain `.`, `/` and `-` so that a qualified name such as
/// `example.com/ext.Hidden` lexes as one token; the parser splits it at the
/// last dot.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token {
    #[token("map")]
    Map,
    #[token("chan")]
    Chan,
    #[token("func")]
    Func,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,

    #[token("*")]
    Star,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("...")]
    Ellipsis,
    #[token("<-")]
    Arrow,

    #[regex(r"[0-9]+")]
    Int,

    /// Struct tag, skipped by the parser.
    #[regex(r"`[^`]*`")]
    #[regex(r#""([^"\\]|\\.)*""#)]
    Tag,

    #[regex(r"[A-Za-z_][A-Za-z0-9_./\-]*")]
    Ident,
}

impl Token {
    /// Tokens that can begin a type.
    pub(crate) fn starts_type(self) -> bool {
        matches!(
            self,
            Token::Map
                | Token::Chan
                | Token::Func
                | Token::Struct
                | Token::Interface
                | Token::Star
                | Token::LBracket
                | Token::LParen
                | Token::Arrow
                | Token::Ident
        )
    }
}

/// A token with its byte range in the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

/// Tokenize `source`, returning the offset of the first invalid byte on error.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Spanned>, usize> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push(Spanned {
                token,
                start: span.start,
                end: span.end,
            }),
            Err(()) => return Err(span.start),
        }
    }
    Ok(tokens)
}
