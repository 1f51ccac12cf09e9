// lexer.rs

use crate::error::Error;
use crate::token::{LexToken, Token};
use std::path::Path;

/// Scanner over one source text. Newlines are tokens; blanks, tabs and
/// carriage returns separate tokens; comments are dropped but the newlines
/// inside them still count towards the line number.
#[derive(Debug)]
pub struct Tokenizer {
    src: Vec<char>,
    pos: usize,
    text: String,
    file: String,
    line: usize,
}

impl Tokenizer {
    pub fn new(file: impl Into<String>, src: &str) -> Self {
        Tokenizer {
            src: src.chars().collect(),
            pos: 0,
            text: String::new(),
            file: file.into(),
            line: 1,
        }
    }

    pub fn open(path: &Path) -> std::io::Result<Self> {
        let src = std::fs::read_to_string(path)?;
        Ok(Tokenizer::new(path.display().to_string(), &src))
    }

    /// Next significant token. A malformed literal is reported as
    /// `Error::Lexical` after it has been consumed, so scanning can resume.
    pub fn next(&mut self) -> Result<Token, Error> {
        loop {
            let scanned = self.scan();
            self.line += self.text.matches('\n').count();
            match scanned {
                Ok(Token::Comment) => continue,
                other => return other,
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn file_name(&self) -> &str {
        &self.file
    }

    pub fn set_pos(&mut self, line: usize, file: &str) {
        self.line = line;
        self.file = file.to_string();
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat_while(&mut self, f: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&f) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn scan(&mut self) -> Result<Token, Error> {
        // 0. Skip blanks
        self.eat_while(|c| matches!(c, ' ' | '\t' | '\r'));
        let start = self.pos;

        // 1. End of input
        let Some(c) = self.bump() else {
            self.text.clear();
            return Ok(Token::Eof);
        };

        let token = match c {
            c if is_ident_start(c) => {
                self.eat_while(is_ident_char);
                Ok(Token::Ident)
            }
            c if c.is_ascii_digit() => self.number(c),
            '.' if self.peek().is_some_and(|d| d.is_ascii_digit()) => self.number(c),
            '"' => self.quoted('"', Token::String),
            '\'' => self.quoted('\'', Token::Rune),
            '`' => self.raw_string(),
            '/' if self.peek() == Some('/') => {
                self.eat_while(|c| c != '\n');
                Ok(Token::Comment)
            }
            '/' if self.peek() == Some('*') => self.block_comment(),
            c => Ok(self.operator(c)),
        };
        self.text = self.src[start..self.pos].iter().collect();
        token
    }

    fn operator(&mut self, c: char) -> Token {
        let token = match (c, self.peek()) {
            ('<', Some('<')) => Token::Lsh,
            ('>', Some('>')) => Token::Rsh,
            ('-', Some('>')) => Token::Arr,
            ('@', Some('>')) => Token::Rot,
            _ => return Token::Char(c),
        };
        self.pos += 1;
        token
    }

    fn number(&mut self, first: char) -> Result<Token, Error> {
        if first == '0' {
            let prefixed = match self.peek() {
                Some('x' | 'X') => Some((16, "hexadecimal")),
                Some('b' | 'B') => Some((2, "binary")),
                Some('o' | 'O') => Some((8, "octal")),
                _ => None,
            };
            if let Some((radix, name)) = prefixed {
                self.pos += 1;
                let start = self.pos;
                let n = self.eat_while(|c| c.is_ascii_hexdigit());
                if n == 0 {
                    return Err(Error::Lexical(format!("{name} literal has no digits")));
                }
                if let Some(bad) = self.src[start..self.pos].iter().find(|c| !c.is_digit(radix)) {
                    return Err(Error::Lexical(format!("invalid digit {bad:?} in {name} literal")));
                }
                return Ok(Token::Int);
            }
        }

        let start = self.pos - 1;
        let mut float = first == '.';
        self.eat_while(|c| c.is_ascii_digit());
        if !float && self.peek() == Some('.') {
            self.pos += 1;
            self.eat_while(|c| c.is_ascii_digit());
            float = true;
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.eat_while(|c| c.is_ascii_digit()) == 0 {
                return Err(Error::Lexical("exponent has no digits".to_string()));
            }
            float = true;
        }
        if float {
            return Ok(Token::Float);
        }

        let digits = &self.src[start..self.pos];
        if digits.len() > 1 && digits[0] == '0' {
            if let Some(bad) = digits.iter().find(|c| !c.is_digit(8)) {
                return Err(Error::Lexical(format!("invalid digit {bad:?} in octal literal")));
            }
        }
        Ok(Token::Int)
    }

    fn quoted(&mut self, quote: char, token: Token) -> Result<Token, Error> {
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(Error::Lexical("literal not terminated".to_string()));
                }
                Some('\\') => {
                    self.pos += 1;
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.pos += 1;
                    }
                }
                Some(c) => {
                    self.pos += 1;
                    if c == quote {
                        return Ok(token);
                    }
                }
            }
        }
    }

    fn raw_string(&mut self) -> Result<Token, Error> {
        loop {
            match self.bump() {
                None => return Err(Error::Lexical("literal not terminated".to_string())),
                Some('`') => return Ok(Token::RawString),
                Some(_) => {}
            }
        }
    }

    fn block_comment(&mut self) -> Result<Token, Error> {
        self.pos += 1;
        loop {
            match self.bump() {
                None => return Err(Error::Lexical("comment not terminated".to_string())),
                Some('*') if self.peek() == Some('/') => {
                    self.pos += 1;
                    return Ok(Token::Comment);
                }
                Some(_) => {}
            }
        }
    }
}

/// `·` and `∕` appear in qualified symbol names such as `runtime·memmove`.
pub fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '·' || c == '∕'
}

pub fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_numeric()
}

/// Tokenizes a string outside of any file, e.g. a `-D` value.
pub fn tokenize(src: &str) -> Result<Vec<LexToken>, Error> {
    let mut tokenizer = Tokenizer::new("command line", src);
    let mut tokens = vec![];
    loop {
        let token = tokenizer.next()?;
        if token == Token::Eof {
            return Ok(tokens);
        }
        tokens.push(LexToken::new(token, tokenizer.text()));
    }
}

/// Integer literal with an optional radix prefix; a bare leading zero means
/// octal.
pub fn parse_int(s: &str) -> Result<u64, Error> {
    let (radix, digits) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        Some("0b" | "0B") => (2, &s[2..]),
        Some("0o" | "0O") => (8, &s[2..]),
        _ if s.len() > 1 && s.starts_with('0') => (8, &s[1..]),
        _ => (10, s),
    };
    u64::from_str_radix(digits, radix)
        .map_err(|e| Error::Syntax(format!("invalid integer constant {s}: {e}")))
}

pub fn parse_float(s: &str) -> Result<f64, Error> {
    s.parse::<f64>()
        .map_err(|e| Error::Syntax(format!("invalid float constant {s}: {e}")))
}

/// Body of a quoted or raw string literal. Byte escapes above 0x7f map to
/// the Latin-1 character of the same value.
pub fn unquote(s: &str) -> Result<String, Error> {
    let bad = || Error::Syntax(format!("invalid string literal {s}"));

    if let Some(raw) = s.strip_prefix('`').and_then(|r| r.strip_suffix('`')) {
        return Ok(raw.replace('\r', ""));
    }
    let body = s
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .ok_or_else(bad)?;

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let esc = chars.next().ok_or_else(bad)?;
        let ch = match esc {
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            '\\' | '"' | '\'' => esc,
            'x' | 'u' | 'U' => {
                let width = match esc {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let hex: String = chars.by_ref().take(width).collect();
                if hex.len() != width {
                    return Err(bad());
                }
                let value = u32::from_str_radix(&hex, 16).map_err(|_| bad())?;
                char::from_u32(value).ok_or_else(bad)?
            }
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    let digit = chars.next().and_then(|c| c.to_digit(8)).ok_or_else(bad)?;
                    value = value * 8 + digit;
                }
                if value > 0xff {
                    return Err(bad());
                }
                char::from_u32(value).ok_or_else(bad)?
            }
            _ => return Err(bad()),
        };
        out.push(ch);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> Vec<(Token, String)> {
        let mut t = Tokenizer::new("test", src);
        let mut out = vec![];
        loop {
            match t.next() {
                Ok(Token::Eof) => return out,
                Ok(tok) => out.push((tok, t.text().to_string())),
                Err(e) => out.push((Token::Eof, format!("error: {e}"))),
            }
        }
    }

    #[test]
    fn composite_operators() {
        let toks: Vec<_> = scan("<< >> -> @> < - @").into_iter().map(|(t, _)| t).collect();
        assert_eq!(
            toks,
            vec![
                Token::Lsh,
                Token::Rsh,
                Token::Arr,
                Token::Rot,
                Token::Char('<'),
                Token::Char('-'),
                Token::Char('@'),
            ]
        );
    }

    #[test]
    fn comment_newlines_are_counted() {
        let mut t = Tokenizer::new("test", "A /* x\ny\nz */ B\nC");
        assert_eq!(t.next().unwrap(), Token::Ident);
        assert_eq!(t.line(), 1);
        assert_eq!(t.next().unwrap(), Token::Ident);
        assert_eq!(t.text(), "B");
        assert_eq!(t.line(), 3);
        assert_eq!(t.next().unwrap(), Token::NEWLINE);
        assert_eq!(t.next().unwrap(), Token::Ident);
        assert_eq!(t.line(), 4);
        assert_eq!(t.next().unwrap(), Token::Eof);
    }

    #[test]
    fn middle_dot_is_an_identifier_rune() {
        assert_eq!(
            scan("runtime·memmove a∕b _x1"),
            vec![
                (Token::Ident, "runtime·memmove".to_string()),
                (Token::Ident, "a∕b".to_string()),
                (Token::Ident, "_x1".to_string()),
            ]
        );
    }

    #[test]
    fn numbers() {
        let toks = scan("0x1F 017 1.5 .5 1e3 42");
        let kinds: Vec<_> = toks.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            kinds,
            vec![Token::Int, Token::Int, Token::Float, Token::Float, Token::Float, Token::Int]
        );
        assert_eq!(parse_int("0x1F").unwrap(), 31);
        assert_eq!(parse_int("017").unwrap(), 15);
        assert_eq!(parse_int("0b101").unwrap(), 5);
        assert_eq!(parse_int("0").unwrap(), 0);
        assert!(parse_int("99999999999999999999999").is_err());
    }

    #[test]
    fn bad_literals_are_recoverable() {
        let toks = scan("\"abc\nX 09");
        assert!(toks[0].1.contains("not terminated"));
        assert_eq!(toks[1].0, Token::NEWLINE);
        assert_eq!(toks[2], (Token::Ident, "X".to_string()));
        assert!(toks[3].1.contains("octal"));
        assert!(!Error::Lexical(String::new()).is_fatal());
    }

    #[test]
    fn strings() {
        assert_eq!(unquote(r#""a\tb\x41\101""#).unwrap(), "a\tbAA");
        assert_eq!(unquote("`raw\\n`").unwrap(), "raw\\n");
        assert!(unquote(r#""\q""#).is_err());
        assert_eq!(scan(r#""a\"b""#), vec![(Token::String, r#""a\"b""#.to_string())]);
    }
}
