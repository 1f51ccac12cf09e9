// token.rs

use std::fmt;

/// Lexical class of a token. Punctuation, including the newline, travels as
/// `Char`; the two-character operators get their own variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Char(char),

    // Double character tokens
    Lsh, // '<<'
    Rsh, // '>>'
    Arr, // '->'
    Rot, // '@>'

    Ident,
    Int,
    Float,
    Rune,
    String,
    RawString,
    Comment,
    Eof,
}

impl Token {
    pub const NEWLINE: Token = Token::Char('\n');

    pub fn is_eol(self) -> bool {
        matches!(self, Token::Char('\n') | Token::Char(';') | Token::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Char(c) => write!(f, "{:?}", c),
            Token::Lsh => write!(f, "<<"),
            Token::Rsh => write!(f, ">>"),
            Token::Arr => write!(f, "->"),
            Token::Rot => write!(f, "@>"),
            Token::Ident => write!(f, "identifier"),
            Token::Int => write!(f, "integer constant"),
            Token::Float => write!(f, "float constant"),
            Token::Rune => write!(f, "rune constant"),
            Token::String => write!(f, "string constant"),
            Token::RawString => write!(f, "raw string constant"),
            Token::Comment => write!(f, "comment"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// A token together with the exact text it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexToken {
    pub token: Token,
    pub text: String,
}

impl LexToken {
    pub fn new(token: Token, text: impl Into<String>) -> Self {
        LexToken {
            token,
            text: text.into(),
        }
    }
}

impl fmt::Display for LexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Space-joined rendering of a token run, used in diagnostics.
pub fn join(tokens: &[LexToken]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
