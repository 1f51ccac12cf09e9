// inst.rs

use crate::addr::{Addr, Shape};
use crate::error::Error;
use crate::label::Patch;
use crate::parser::Parser;
use crate::prog::{Kind, Operand, Prog};
use crate::pseudo::{bad, count};
use crate::symbols::{SymbolKind, SymbolTable};
use crate::token::LexToken;
use arch::{As, Reg};
use tracing::trace;

impl<S: SymbolTable> Parser<'_, S> {
    pub(crate) fn instruction(
        &mut self,
        op: As,
        word: &str,
        operands: &[Vec<LexToken>],
    ) -> Result<(), Error> {
        let addrs = operands
            .iter()
            .map(|tokens| self.address(tokens))
            .collect::<Result<Vec<_>, _>>()?;
        if self.arch.is_jump(op) {
            self.asm_jump(op, word, &addrs)
        } else {
            self.asm_instruction(op, word, operands, &addrs)
        }
    }

    /// `MOVQ R9, (R10)`, `NOTQ AX`, `PSHUFL $0x1b, X1, X2`
    fn asm_instruction(
        &mut self,
        op: As,
        word: &str,
        operands: &[Vec<LexToken>],
        addrs: &[Addr],
    ) -> Result<(), Error> {
        let mut prog = Prog::new(op, self.line());
        match addrs {
            [] => {}
            [a] => {
                if self.arch.is_unary_destination(op) {
                    prog.to = self.resolve(a)?;
                } else {
                    prog.from = self.resolve(a)?;
                }
            }
            [a0, a1] => {
                prog.from = self.resolve(a0)?;
                prog.to = self.resolve(a1)?;
                // A DX:AX pair is only legal on the right; the second
                // register travels in the source's index.
                if let Some(r2) = a1.register2 {
                    if prog.from.index.is_some() {
                        return Err(Error::RegisterPair);
                    }
                    prog.from.index = Some(r2);
                }
            }
            [a0, a1, a2] => {
                if a2.is(Shape::OFFSET) {
                    prog.from = self.resolve(a0)?;
                    prog.to = self.resolve(a1)?;
                    prog.to.offset = a2.offset.unwrap_or(0);
                } else if a2.is(Shape::REGISTER) {
                    // The immediate moves into the destination's offset.
                    if !a0.is_immediate_constant {
                        return Err(bad(word, "expected $value for 1st operand", &operands[0]));
                    }
                    prog.from = self.resolve(a1)?;
                    prog.to = self.resolve(a2)?;
                    prog.to.offset = a0.offset.unwrap_or(0);
                } else {
                    return Err(bad(word, "expected offset or register for 3rd operand", &operands[2]));
                }
            }
            _ => return Err(count(word, "at most three")),
        }
        self.link(prog, true)?;
        Ok(())
    }

    /// `JMP AX`, `JMP exit`, `JMP 3(PC)`, `CALL runtime·morestack(SB)`
    fn asm_jump(&mut self, op: As, word: &str, addrs: &[Addr]) -> Result<(), Error> {
        // An empty first operand never reaches here, so `JMP , L` is the
        // one-operand form.
        let target = match addrs {
            [a] => a,
            [_, _] => {
                return Err(Error::Syntax(
                    "two-address jump must have empty first address".to_string(),
                ))
            }
            _ => return Err(count(word, "one or two")),
        };

        let mut prog = Prog::new(op, self.line());
        let indirect = Shape::REGISTER | Shape::INDIRECT;
        let symbol = Shape::SYMBOL | Shape::INDIRECT | Shape::REGISTER;
        let mut pending = None;

        if target.is(Shape::REGISTER) {
            prog.to = self.resolve(target)?;
        } else if target.is(Shape::SYMBOL) {
            let label = target.symbol.clone().unwrap_or_default();
            match self.labels.get(&label) {
                Some(id) => prog.to = Operand::branch_to(id),
                None => pending = Some(label),
            }
        } else if target.is(indirect) || target.is(indirect | Shape::OFFSET) {
            let offset = target.offset.unwrap_or(0);
            if target.register == Some(Reg::PC) {
                // The PC is bumped when this record is linked.
                prog.to = Operand {
                    kind: Kind::Branch,
                    offset: self.pc + 1 + offset,
                    ..Default::default()
                };
            } else {
                prog.to = self.resolve(target)?;
            }
        } else if target.is(symbol) || target.is(symbol | Shape::OFFSET) {
            if target.register != Some(Reg::SB) {
                return Err(Error::Syntax("jmp to symbol must be SB-relative".to_string()));
            }
            let name = target.symbol.as_deref().unwrap_or_default();
            prog.to = Operand {
                kind: Kind::Branch,
                sym: Some(self.symbols.lookup_or_create(name, SymbolKind::Ref)),
                offset: target.offset.unwrap_or(0),
                ..Default::default()
            };
        } else {
            return Err(Error::Syntax(format!("cannot assemble jump {word}")));
        }

        let id = self.link(prog, true)?;
        if let Some(label) = pending {
            trace!(label = %label, prog = id.0, "forward jump");
            let patch = Patch {
                prog: id,
                label,
                file: self.file().to_string(),
                line: self.line(),
            };
            self.labels.defer(patch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::error::{Error, Failure};
    use crate::input::Input;
    use crate::parser::Parser;
    use crate::prog::{Kind, Operand, Prog, Program};
    use crate::symbols::Symbols;
    use arch::Target;

    fn run(src: &str) -> (Result<Program, Failure>, Symbols) {
        let config = Config::new("test.s", Target::Amd64);
        let input = Input::from_source("test.s", src, &config).unwrap();
        let mut symbols = Symbols::new();
        let result = Parser::new(Target::Amd64.table(), input, &mut symbols, 10).parse();
        (result, symbols)
    }

    fn progs(src: &str) -> Vec<Prog> {
        let program = run(src).0.unwrap();
        program.iter().map(|(_, p)| p.clone()).collect()
    }

    fn reg(name: &str) -> arch::Reg {
        Target::Amd64.table().register(name).unwrap()
    }

    #[test]
    fn operand_slots() {
        let progs = progs("NOP\nNOTQ AX\nPUSHQ BX\nMOVQ CX, DX\n");
        assert!(progs[0].from.is_none() && progs[0].to.is_none());
        assert!(progs[1].from.is_none());
        assert_eq!(progs[1].to, Operand::reg(reg("AX")));
        assert_eq!(progs[2].from, Operand::reg(reg("BX")));
        assert!(progs[2].to.is_none());
        assert_eq!(progs[3].from, Operand::reg(reg("CX")));
        assert_eq!(progs[3].to, Operand::reg(reg("DX")));
    }

    #[test]
    fn three_operands() {
        let progs = progs("PSHUFL $0x1b, X1, X2\nCMPSD X1, X2, 4\n");
        let shuf = &progs[0];
        println!("{shuf:?}");
        assert_eq!(shuf.from, Operand::reg(reg("X1")));
        assert_eq!(shuf.to.kind, Kind::Reg(reg("X2")));
        assert_eq!(shuf.to.offset, 0x1b);

        let cmp = &progs[1];
        assert_eq!(cmp.from, Operand::reg(reg("X1")));
        assert_eq!(cmp.to.kind, Kind::Reg(reg("X2")));
        assert_eq!(cmp.to.offset, 4);
    }

    #[test]
    fn register_pair() {
        let progs = progs("SHLQ $4, AX:DX\n");
        assert_eq!(progs[0].from.kind, Kind::Const);
        assert_eq!(progs[0].from.index, Some(reg("DX")));
        assert_eq!(progs[0].to, Operand::reg(reg("AX")));

        match run("SHLQ (BX)(CX*1), AX:DX\n").0 {
            Err(Failure::Rejected(diags)) => assert!(matches!(diags[0].error, Error::RegisterPair)),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn labels_both_directions() {
        let src = "top:\n\tNOP\n\tJEQ done\n\tJMP top\ndone:\tRET\n";
        let program = run(src).0.unwrap();
        let ids: Vec<_> = program.iter().map(|(id, _)| id).collect();
        let progs: Vec<_> = program.iter().map(|(_, p)| p.clone()).collect();
        assert_eq!(progs[1].to.target(), Some(ids[3]));
        assert_eq!(progs[2].to.target(), Some(ids[0]));
        assert_eq!(progs[1].to.kind, Kind::Branch);
    }

    #[test]
    fn jump_forms() {
        let (program, symbols) = run("NOP\nJMP 2(PC)\nJMP AX\nCALL runtime·morestack(SB)\nJMP 8(BX)\n");
        let progs: Vec<_> = program.unwrap().iter().map(|(_, p)| p.clone()).collect();
        assert_eq!(progs[1].to.kind, Kind::Branch);
        assert_eq!(progs[1].to.offset, 4);
        assert_eq!(progs[2].to, Operand::reg(reg("AX")));
        assert_eq!(progs[3].to.kind, Kind::Branch);
        assert_eq!(symbols.name(progs[3].to.sym.unwrap()), Some("runtime·morestack"));
        assert_eq!(progs[4].to.kind, Kind::Indirect(Some(reg("BX"))));
        assert_eq!(progs[4].to.offset, 8);
    }

    #[test]
    fn empty_first_jump_operand() {
        let progs = progs("JMP , done\ndone: RET\n");
        assert_eq!(progs[0].to.kind, Kind::Branch);
        assert!(progs[0].from.is_none());
    }

    #[test]
    fn bad_jumps() {
        for src in ["JMP foo(FP)\n", "JMP $1\n", "JMP AX, BX, CX\n", "JMP AX, done\ndone: RET\n"] {
            match run(src).0 {
                Err(Failure::Rejected(diags)) => println!("{}", diags[0]),
                other => panic!("expected rejection for {src:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn label_errors_are_fatal() {
        match run("a: NOP\na: NOP\n").0 {
            Err(Failure::Aborted { fatal, .. }) => {
                assert!(matches!(fatal.error, Error::RedefinedLabel(_)));
                assert_eq!(fatal.line, 2);
            }
            other => panic!("expected abort, got {other:?}"),
        }
        match run("NOP\nJMP nowhere\n").0 {
            Err(Failure::Aborted { fatal, .. }) => {
                assert!(matches!(fatal.error, Error::UndefinedLabel(_)));
                assert_eq!(fatal.line, 2);
            }
            other => panic!("expected abort, got {other:?}"),
        }
    }
}
