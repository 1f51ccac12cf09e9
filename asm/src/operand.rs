// operand.rs

use crate::addr::Addr;
use crate::error::Error;
use crate::lexer::{parse_float, parse_int, unquote};
use crate::token::{LexToken, Token};
use arch::{ArchTable, Reg};

/// Recursive-descent parser over the tokens of a single operand.
pub struct OperandParser<'a> {
    arch: &'a ArchTable,
    input: &'a [LexToken],
    pos: usize,
}

#[derive(Debug, Clone, Copy)]
struct Item<'a> {
    token: Token,
    text: &'a str,
}

const END: Item<'static> = Item {
    token: Token::Eof,
    text: "end of operand",
};

/// Parses one comma-separated operand. Every token must be consumed.
pub fn parse_operand(arch: &ArchTable, tokens: &[LexToken]) -> Result<Addr, Error> {
    if tokens.is_empty() {
        return Err(Error::MissingOperand);
    }
    let mut p = OperandParser::new(arch, tokens);
    let mut addr = Addr::default();
    p.operand(&mut addr)?;
    Ok(addr)
}

/// Evaluates a whole token run as an integer expression.
pub fn eval_expr(arch: &ArchTable, tokens: &[LexToken]) -> Result<u64, Error> {
    let mut p = OperandParser::new(arch, tokens);
    let value = p.expr()?;
    p.expect(Token::Eof)?;
    Ok(value)
}

impl<'a> OperandParser<'a> {
    pub fn new(arch: &'a ArchTable, input: &'a [LexToken]) -> Self {
        OperandParser {
            arch,
            input,
            pos: 0,
        }
    }

    fn peek(&self) -> Token {
        self.input.get(self.pos).map(|t| t.token).unwrap_or(Token::Eof)
    }

    fn next(&mut self) -> Item<'a> {
        let input: &'a [LexToken] = self.input;
        match input.get(self.pos) {
            Some(t) => {
                self.pos += 1;
                Item {
                    token: t.token,
                    text: &t.text,
                }
            }
            None => END,
        }
    }

    fn back(&mut self) {
        self.pos -= 1;
    }

    /// Whether any of the remaining tokens is of this kind.
    fn have(&self, token: Token) -> bool {
        self.input[self.pos..].iter().any(|t| t.token == token)
    }

    fn expect(&mut self, token: Token) -> Result<(), Error> {
        if self.peek() != token {
            return Err(Error::expected(token, self.next().text));
        }
        Ok(())
    }

    fn get(&mut self, token: Token) -> Result<Item<'a>, Error> {
        self.expect(token)?;
        Ok(self.next())
    }

    fn register(&self, name: &str) -> Option<Reg> {
        self.arch.register(name)
    }

    fn operand(&mut self, a: &mut Addr) -> Result<(), Error> {
        match self.peek() {
            // $con, $sym, $str, $float
            Token::Char('$') => {
                self.next();
                match self.peek() {
                    Token::Ident => {
                        a.is_immediate_address = true;
                        return self.operand(a);
                    }
                    Token::String => {
                        a.is_immediate_constant = true;
                        a.string = Some(unquote(self.next().text)?);
                    }
                    Token::Int | Token::Float | Token::Char('+' | '-' | '~' | '(') => {
                        a.is_immediate_constant = true;
                        self.number(a)?;
                    }
                    _ => {
                        let tok = self.next();
                        return Err(Error::Syntax(format!(
                            "illegal {} in immediate operand",
                            tok.text
                        )));
                    }
                }
            }

            // *AX
            Token::Char('*') => {
                self.next();
                let tok = self.next();
                match self.register(tok.text) {
                    Some(r) => a.register = Some(r),
                    None => return Err(Error::ExpectedRegister(tok.text.to_string())),
                }
            }

            // (AX), (AX)(BX*4), or a parenthesized expression
            Token::Char('(') => {
                self.next();
                let is_register = self.peek() == Token::Ident;
                self.back();
                if is_register {
                    self.address_mode(a)?;
                } else {
                    self.offset_then_mode(a)?;
                }
            }

            // 8(SP), -4(AX)(CX*2), 1.5
            Token::Char('+' | '-' | '~') | Token::Int | Token::Float => {
                self.offset_then_mode(a)?;
            }

            Token::Ident => {
                let tok = self.next();
                match self.register(tok.text) {
                    Some(r) => {
                        // AX or DX:AX
                        a.register = Some(r);
                        if self.peek() == Token::Char(':') {
                            self.next();
                            let tok = self.get(Token::Ident)?;
                            match self.register(tok.text) {
                                Some(r2) => a.register2 = Some(r2),
                                None => return Err(Error::ExpectedRegister(tok.text.to_string())),
                            }
                        }
                    }
                    None => self.symbol_reference(a, tok.text)?,
                }
            }

            _ => {
                let tok = self.next();
                return Err(Error::Syntax(format!("unexpected {} in operand", tok.text)));
            }
        }
        self.expect(Token::Eof)
    }

    /// `name`, `name<>`, `name+off`, then an optional `(SB|FP|SP)` base and
    /// an optional scaled index.
    fn symbol_reference(&mut self, a: &mut Addr, name: &str) -> Result<(), Error> {
        if self.peek() == Token::Char('<') {
            self.next();
            self.get(Token::Char('>'))?;
            a.is_static = true;
        }
        if matches!(self.peek(), Token::Char('+' | '-')) {
            a.offset = Some(self.expr()? as i64);
        }
        a.symbol = Some(name.to_string());
        if self.peek() == Token::Eof {
            return Ok(());
        }

        self.expect(Token::Char('('))?;
        self.paren_register(a)?;
        if !matches!(a.register, Some(Reg::SB | Reg::FP | Reg::SP)) {
            return Err(Error::Syntax(format!(
                "expected SB, FP, or SP offset for {name}"
            )));
        }
        if self.peek() != Token::Eof {
            self.expect(Token::Char('('))?;
            self.address_mode(a)?;
        }
        Ok(())
    }

    fn offset_then_mode(&mut self, a: &mut Addr) -> Result<(), Error> {
        self.number(a)?;
        if self.peek() != Token::Eof {
            self.expect(Token::Char('('))?;
            self.address_mode(a)?;
        }
        Ok(())
    }

    /// A float anywhere in the remaining tokens makes the whole thing a
    /// float expression.
    fn number(&mut self, a: &mut Addr) -> Result<(), Error> {
        if self.have(Token::Float) {
            a.float = Some(self.float_expr()?);
        } else {
            a.offset = Some(self.expr()? as i64);
        }
        Ok(())
    }

    /// `(R)`, `(R*s)` or `(R)(R*s)`.
    fn address_mode(&mut self, a: &mut Addr) -> Result<(), Error> {
        let scaled = self.paren_register(a)?;
        if !scaled && self.peek() == Token::Char('(') {
            self.paren_register(a)?;
        }
        Ok(())
    }

    /// One parenthesized register, possibly scaled. Returns whether it was
    /// the scaled index form.
    fn paren_register(&mut self, a: &mut Addr) -> Result<bool, Error> {
        self.next();
        let tok = self.next();
        if tok.token != Token::Ident {
            return Err(Error::ExpectedRegister(tok.text.to_string()));
        }
        let r = self
            .register(tok.text)
            .ok_or_else(|| Error::ExpectedRegister(tok.text.to_string()))?;
        a.is_indirect = true;

        let scaled = self.peek() == Token::Char('*');
        if scaled {
            self.next();
            let tok = self.get(Token::Int)?;
            a.scale = Some(parse_scale(tok.text)?);
            a.index = Some(r);
        } else {
            if a.register.is_some() {
                return Err(Error::MultipleIndirections);
            }
            a.register = Some(r);
        }
        self.get(Token::Char(')'))?;
        Ok(scaled)
    }

    /// Integer expression: `term { (+ - | ^) term }`. Addition fails on
    /// unsigned overflow; everything else wraps.
    pub fn expr(&mut self) -> Result<u64, Error> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Token::Char('+') => {
                    self.next();
                    let x = self.term()?;
                    value = value.checked_add(x).ok_or(Error::Overflow(value, x))?;
                }
                Token::Char('-') => {
                    self.next();
                    value = value.wrapping_sub(self.term()?);
                }
                Token::Char('|') => {
                    self.next();
                    value |= self.term()?;
                }
                Token::Char('^') => {
                    self.next();
                    value ^= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    /// `factor { (* / % << >> &) factor }`, left associative.
    fn term(&mut self) -> Result<u64, Error> {
        let mut value = self.factor()?;
        loop {
            match self.peek() {
                Token::Char('*') => {
                    self.next();
                    value = value.wrapping_mul(self.factor()?);
                }
                Token::Char('/') => {
                    self.next();
                    let x = self.factor()?;
                    value = value.checked_div(x).ok_or(Error::DivisionByZero)?;
                }
                Token::Char('%') => {
                    self.next();
                    let x = self.factor()?;
                    value = value.checked_rem(x).ok_or(Error::DivisionByZero)?;
                }
                Token::Lsh => {
                    self.next();
                    let x = self.factor()?;
                    value = if x >= 64 { 0 } else { value << x };
                }
                Token::Rsh => {
                    self.next();
                    let x = self.factor()?;
                    value = if x >= 64 { 0 } else { value >> x };
                }
                Token::Char('&') => {
                    self.next();
                    value &= self.factor()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<u64, Error> {
        let tok = self.next();
        match tok.token {
            Token::Char('(') => {
                let value = self.expr()?;
                if self.next().token != Token::Char(')') {
                    return Err(Error::Syntax("missing closing paren".to_string()));
                }
                Ok(value)
            }
            Token::Char('+') => self.factor(),
            Token::Char('-') => Ok(self.factor()?.wrapping_neg()),
            Token::Char('~') => Ok(!self.factor()?),
            Token::Int => parse_int(tok.text),
            _ => Err(Error::Syntax(format!(
                "unexpected {} evaluating expression",
                tok.text
            ))),
        }
    }

    /// `[+-] ( float | (floatExpr) )`. Integers are not accepted.
    fn float_expr(&mut self) -> Result<f64, Error> {
        let tok = self.next();
        match tok.token {
            Token::Char('(') => {
                let value = self.float_expr()?;
                if self.next().token != Token::Char(')') {
                    return Err(Error::Syntax("missing closing paren".to_string()));
                }
                Ok(value)
            }
            Token::Char('+') => self.float_expr(),
            Token::Char('-') => Ok(-self.float_expr()?),
            Token::Float => parse_float(tok.text),
            _ => Err(Error::Syntax(format!(
                "unexpected {} evaluating float expression",
                tok.text
            ))),
        }
    }
}

pub(crate) fn parse_scale(s: &str) -> Result<i8, Error> {
    match s {
        "1" | "2" | "4" | "8" => Ok(s.as_bytes()[0] as i8 - b'0' as i8),
        _ => Err(Error::BadScale(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use arch::Target;

    fn parse(src: &str) -> Result<Addr, Error> {
        parse_operand(Target::Amd64.table(), &tokenize(src)?)
    }

    fn reg(name: &str) -> Option<Reg> {
        Target::Amd64.table().register(name)
    }

    #[test]
    fn immediates() {
        let a = parse("$0x10").unwrap();
        assert!(a.is_immediate_constant);
        assert_eq!(a.offset, Some(16));

        let a = parse("$(1<<4)|3").unwrap();
        assert_eq!(a.offset, Some(19));

        let a = parse("$-1.5").unwrap();
        assert_eq!(a.float, Some(-1.5));
        assert!(parse("$(1.5)").is_ok());
        assert!(parse("$(-(1))+1.5").is_err());

        let a = parse("$\"hi\\n\"").unwrap();
        assert_eq!(a.string.as_deref(), Some("hi\n"));

        let a = parse("$runtime·x(SB)").unwrap();
        assert!(a.is_immediate_address);
        assert_eq!(a.register, Some(Reg::SB));
    }

    #[test]
    fn registers_and_memory() {
        let a = parse("DX:AX").unwrap();
        assert_eq!((a.register, a.register2), (reg("DX"), reg("AX")));

        let a = parse("-8(SP)(CX*4)").unwrap();
        assert_eq!(a.offset, Some(-8));
        assert_eq!(a.register, Some(Reg::SP));
        assert_eq!((a.index, a.scale), (reg("CX"), Some(4)));
        assert!(a.is_indirect);

        let a = parse("*AX").unwrap();
        assert_eq!(a.register, reg("AX"));
        assert!(!a.is_indirect);
    }

    #[test]
    fn symbols() {
        let a = parse("foo<>+4(SB)(CX*8)").unwrap();
        assert_eq!(a.symbol.as_deref(), Some("foo"));
        assert!(a.is_static);
        assert_eq!(a.offset, Some(4));
        assert_eq!(a.register, Some(Reg::SB));
        assert_eq!((a.index, a.scale), (reg("CX"), Some(8)));

        let a = parse("x+8(FP)").unwrap();
        assert_eq!((a.offset, a.register), (Some(8), Some(Reg::FP)));

        let a = parse("loop").unwrap();
        assert_eq!(a.symbol.as_deref(), Some("loop"));
        assert_eq!(a.register, None);
    }

    #[test]
    fn operand_errors() {
        assert!(matches!(parse("(AX)(BX)"), Err(Error::MultipleIndirections)));
        assert!(matches!(parse("(AX*3)"), Err(Error::BadScale(_))));
        assert!(matches!(parse("foo(AX)"), Err(Error::Syntax(_))));
        assert!(matches!(parse("AX BX"), Err(Error::Expected { .. })));
        assert!(matches!(parse("$1/0"), Err(Error::DivisionByZero)));
        assert!(matches!(parse("$0xffffffffffffffff+1"), Err(Error::Overflow(..))));
        assert!(matches!(parse("(FOO)"), Err(Error::ExpectedRegister(_))));
    }

    #[test]
    fn precedence() {
        let arch = Target::Amd64.table();
        let eval = |s: &str| eval_expr(arch, &tokenize(s).unwrap()).unwrap();
        assert_eq!(eval("2+3*4"), 14);
        assert_eq!(eval("(2+3)*4"), 20);
        assert_eq!(eval("8/2/2"), 2);
        assert_eq!(eval("~0&0xff"), 0xff);
        assert_eq!(eval("-1") as i64, -1);
        assert_eq!(eval("1<<70"), 0);
    }
}
