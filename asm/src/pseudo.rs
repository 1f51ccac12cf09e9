// pseudo.rs

use crate::addr::{Addr, Shape};
use crate::error::Error;
use crate::operand::{eval_expr, parse_scale};
use crate::parser::Parser;
use crate::prog::{Operand, Prog};
use crate::symbols::{normalize, SymbolKind, SymbolTable};
use crate::token::{join, LexToken, Token};
use arch::{As, Pseudo, Reg};

pub(crate) fn count(word: &str, expected: &'static str) -> Error {
    Error::OperandCount {
        op: word.to_string(),
        expected,
    }
}

pub(crate) fn bad(word: &str, reason: &'static str, tokens: &[LexToken]) -> Error {
    Error::BadOperand {
        op: word.to_string(),
        reason,
        operand: join(tokens),
    }
}

impl<S: SymbolTable> Parser<'_, S> {
    pub(crate) fn pseudo(
        &mut self,
        pseudo: Pseudo,
        op: As,
        word: &str,
        operands: &[Vec<LexToken>],
    ) -> Result<(), Error> {
        let prog = match pseudo {
            Pseudo::TEXT => self.text(op, word, operands)?,
            Pseudo::DATA => self.data(op, word, operands)?,
            Pseudo::GLOBL => self.globl(op, word, operands)?,
            Pseudo::PCDATA => self.pcdata(op, word, operands)?,
            Pseudo::FUNCDATA => self.funcdata(op, word, operands)?,
        };
        self.link(prog, pseudo.advances_pc())?;
        Ok(())
    }

    /// `name(SB)`, or `name+off(SB)` when `offset` is allowed. Returns the
    /// parsed operand and the name the object file should see.
    fn sb_symbol(
        &self,
        word: &str,
        tokens: &[LexToken],
        offset: bool,
    ) -> Result<(Addr, String), Error> {
        let a = self.address(tokens)?;
        let plain = Shape::SYMBOL | Shape::REGISTER | Shape::INDIRECT;
        let shape_ok = a.is(plain) || (offset && a.is(plain | Shape::OFFSET));
        if !shape_ok || a.register != Some(Reg::SB) {
            return Err(bad(word, "symbol must be an offset from SB", tokens));
        }
        let name = normalize(a.symbol.as_deref().unwrap_or_default());
        Ok((a, name))
    }

    /// `$con`
    fn immediate(&self, word: &str, tokens: &[LexToken], reason: &'static str) -> Result<i64, Error> {
        let a = self.address(tokens)?;
        match a.offset {
            Some(offset) if a.is(Shape::IMMEDIATE_CONSTANT | Shape::OFFSET) => Ok(offset),
            _ => Err(bad(word, reason, tokens)),
        }
    }

    /// `TEXT runtime·memmove(SB), 7, $frame-args`. The frame size lands in
    /// the low 32 bits of the destination, the argument size in the high.
    fn text(&mut self, op: As, word: &str, operands: &[Vec<LexToken>]) -> Result<Prog, Error> {
        if operands.len() != 3 {
            return Err(count(word, "three"));
        }
        let (name_addr, name) = self.sb_symbol(word, &operands[0], false)?;

        let flag_addr = self.address(&operands[1])?;
        let flag = match flag_addr.offset {
            Some(flag) if flag_addr.is(Shape::OFFSET) => flag as i8,
            _ => return Err(bad(word, "flag must be an integer", &operands[1])),
        };

        // $a-b is two numbers, not a subtraction; $-b means $0-b.
        let mut sizes: &[LexToken] = &operands[2];
        let n = sizes.len();
        let mut args = 0u64;
        if n >= 2 && sizes[n - 2].token == Token::Char('-') && sizes[n - 1].token == Token::Int {
            args = eval_expr(self.arch, &sizes[n - 1..])?;
            sizes = &sizes[..n - 2];
        }
        let frame = if sizes.len() == 1 && sizes[0].token == Token::Char('$') {
            0
        } else {
            self.immediate(word, sizes, "frame size must be an immediate constant")?
        };

        let mut prog = Prog::new(op, self.line());
        prog.from = Operand {
            kind: self.symbol_kind(&name_addr)?,
            sym: Some(self.symbols.lookup_or_create(&name, SymbolKind::Text)),
            scale: flag,
            ..Default::default()
        };
        prog.to = Operand::constant(((args as i64) << 32) | (frame & 0xffff_ffff));
        Ok(prog)
    }

    /// `DATA masks<>+0x08(SB)/4, $0x00ff00ff`
    fn data(&mut self, op: As, word: &str, operands: &[Vec<LexToken>]) -> Result<Prog, Error> {
        if operands.len() != 2 {
            return Err(count(word, "two"));
        }
        let target = &operands[0];
        let n = target.len();
        if n < 3 || target[n - 2].token != Token::Char('/') || target[n - 1].token != Token::Int {
            return Err(bad(word, "expect /size for DATA argument", target));
        }
        let width = parse_scale(&target[n - 1].text)?;
        let (name_addr, name) = self.sb_symbol(word, &target[..n - 2], true)?;

        let value = self.address(&operands[1])?;
        if !value.is_immediate_constant && !value.is_immediate_address {
            return Err(bad(word, "value must be an immediate constant or address", &operands[1]));
        }

        let mut prog = Prog::new(op, self.line());
        prog.from = Operand {
            kind: self.symbol_kind(&name_addr)?,
            sym: Some(self.symbols.lookup_or_create(&name, SymbolKind::Data)),
            offset: name_addr.offset.unwrap_or(0),
            scale: width,
            ..Default::default()
        };
        prog.to = self.resolve(&value)?;
        Ok(prog)
    }

    /// `GLOBL shifts<>(SB), 8, $256` or `GLOBL shifts<>(SB), $256`
    fn globl(&mut self, op: As, word: &str, operands: &[Vec<LexToken>]) -> Result<Prog, Error> {
        if operands.len() != 2 && operands.len() != 3 {
            return Err(count(word, "two or three"));
        }
        let (name_addr, name) = self.sb_symbol(word, &operands[0], false)?;

        let mut flag = 0;
        let mut size_tokens = &operands[1];
        if operands.len() == 3 {
            let flag_addr = self.address(&operands[1])?;
            flag = match flag_addr.offset {
                Some(flag) if flag_addr.is(Shape::OFFSET) => flag as i8,
                _ => return Err(bad(word, "flag must be a constant", &operands[1])),
            };
            size_tokens = &operands[2];
        }
        let size = self.immediate(word, size_tokens, "size must be an immediate constant")?;

        let mut prog = Prog::new(op, self.line());
        prog.from = Operand {
            kind: self.symbol_kind(&name_addr)?,
            sym: Some(self.symbols.lookup_or_create(&name, SymbolKind::Data)),
            offset: name_addr.offset.unwrap_or(0),
            scale: flag,
            ..Default::default()
        };
        prog.to = Operand::constant(size);
        Ok(prog)
    }

    /// `PCDATA $2, $705`
    fn pcdata(&mut self, op: As, word: &str, operands: &[Vec<LexToken>]) -> Result<Prog, Error> {
        if operands.len() != 2 {
            return Err(count(word, "two"));
        }
        let reason = "value must be an immediate constant";
        let key = self.immediate(word, &operands[0], reason)?;
        let value = self.immediate(word, &operands[1], reason)?;

        let mut prog = Prog::new(op, self.line());
        prog.from = Operand::constant(key);
        prog.to = Operand::constant(value);
        Ok(prog)
    }

    /// `FUNCDATA $1, gclocals·x(SB)`
    fn funcdata(&mut self, op: As, word: &str, operands: &[Vec<LexToken>]) -> Result<Prog, Error> {
        if operands.len() != 2 {
            return Err(count(word, "two"));
        }
        let index = self.immediate(word, &operands[0], "value must be an immediate constant")?;
        let (name_addr, name) = self.sb_symbol(word, &operands[1], false)?;

        let mut prog = Prog::new(op, self.line());
        prog.from = Operand::constant(index);
        prog.to = Operand {
            kind: self.symbol_kind(&name_addr)?,
            sym: Some(self.symbols.lookup_or_create(&name, SymbolKind::Ref)),
            ..Default::default()
        };
        Ok(prog)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::error::{Error, Failure};
    use crate::input::Input;
    use crate::parser::Parser;
    use crate::prog::{Kind, Operand, Prog, Program};
    use crate::symbols::{SymbolKind, Symbols};
    use arch::Target;

    fn run(src: &str) -> (Result<Program, Failure>, Symbols) {
        let config = Config::new("test.s", Target::Amd64);
        let input = Input::from_source("test.s", src, &config).unwrap();
        let mut symbols = Symbols::new();
        let result = Parser::new(Target::Amd64.table(), input, &mut symbols, 10).parse();
        (result, symbols)
    }

    fn progs(src: &str) -> (Vec<Prog>, Symbols) {
        let (program, symbols) = run(src);
        let program = program.unwrap();
        (program.iter().map(|(_, p)| p.clone()).collect(), symbols)
    }

    fn first_error(src: &str) -> Error {
        match run(src).0 {
            Err(Failure::Rejected(mut diags)) => diags.remove(0).error,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn text_packs_frame_and_args() {
        let (progs, symbols) = progs("TEXT runtime·memmove(SB), 7, $24-16\nRET\n");
        let text = &progs[0];
        assert_eq!(text.from.kind, Kind::Extern);
        assert_eq!(text.from.scale, 7);
        assert_eq!(text.to, Operand::constant((16 << 32) | 24));
        let sym = text.from.sym.unwrap();
        assert_eq!(symbols.name(sym), Some("runtime.memmove"));
        assert_eq!(symbols.kind(sym), Some(SymbolKind::Text));
        assert_eq!((text.pc, progs[1].pc), (1, 2));
    }

    #[test]
    fn text_without_frame_size() {
        let (progs, _) = progs("TEXT f<>(SB), 0, $-8\nRET\n");
        assert_eq!(progs[0].from.kind, Kind::Static);
        assert_eq!(progs[0].to, Operand::constant(8 << 32));
    }

    #[test]
    fn data_and_globl_do_not_advance_pc() {
        let src = "DATA masks<>+0x08(SB)/4, $0xff\nGLOBL masks<>(SB), 8, $16\nNOP\n";
        let (progs, symbols) = progs(src);
        assert_eq!(progs.iter().map(|p| p.pc).collect::<Vec<_>>(), vec![0, 0, 1]);

        let data = &progs[0];
        assert_eq!(data.from.kind, Kind::Static);
        assert_eq!((data.from.offset, data.from.scale), (8, 4));
        assert_eq!(data.to, Operand::constant(0xff));
        assert_eq!(symbols.kind(data.from.sym.unwrap()), Some(SymbolKind::Data));

        let globl = &progs[1];
        assert_eq!(globl.from.sym, data.from.sym);
        assert_eq!(globl.from.scale, 8);
        assert_eq!(globl.to, Operand::constant(16));
    }

    #[test]
    fn pcdata_and_funcdata() {
        let (progs, symbols) = progs("PCDATA $2, $705\nFUNCDATA $1, gclocals·f(SB)\n");
        assert_eq!(progs[0].from, Operand::constant(2));
        assert_eq!(progs[0].to, Operand::constant(705));
        assert_eq!(progs[1].from, Operand::constant(1));
        assert_eq!(progs[1].to.kind, Kind::Extern);
        assert_eq!(symbols.name(progs[1].to.sym.unwrap()), Some("gclocals.f"));
    }

    #[test]
    fn malformed_pseudo_ops() {
        assert!(matches!(first_error("TEXT f(SB), 0\n"), Error::OperandCount { .. }));
        assert!(matches!(first_error("TEXT f(FP), 0, $0\n"), Error::BadOperand { .. }));
        assert!(matches!(first_error("TEXT f(SB), $0, $0\n"), Error::BadOperand { .. }));
        assert!(matches!(first_error("DATA x(SB), $1\n"), Error::BadOperand { .. }));
        assert!(matches!(first_error("DATA x(SB)/3, $1\n"), Error::BadScale(_)));
        assert!(matches!(first_error("DATA x(SB)/4, AX\n"), Error::BadOperand { .. }));
        assert!(matches!(first_error("GLOBL x(SB), 16\n"), Error::BadOperand { .. }));
        assert!(matches!(first_error("PCDATA $1\n"), Error::OperandCount { .. }));
    }
}
