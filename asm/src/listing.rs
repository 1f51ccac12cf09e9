// listing.rs

use crate::prog::{Kind, Operand, Prog, Program, SymClass, Value};
use crate::symbols::Symbols;
use arch::{ArchTable, Pseudo};
use color_print::cformat;

/// Human-readable dump of an assembled program, one record per line.
pub struct Listing<'a> {
    arch: &'a ArchTable,
    program: &'a Program,
    symbols: &'a Symbols,
}

impl<'a> Listing<'a> {
    pub fn new(arch: &'a ArchTable, program: &'a Program, symbols: &'a Symbols) -> Self {
        Listing {
            arch,
            program,
            symbols,
        }
    }

    pub fn print(&self) {
        println!("{}", "-".repeat(60));
        for (_, prog) in self.program.iter() {
            let operands = self.operands(prog);
            println!(
                "{}",
                cformat!(
                    "<c>{:05}</> <dim>({:>4})</> <s>{:<8}</> {}",
                    prog.pc,
                    prog.line,
                    self.arch.op_name(prog.op),
                    operands
                )
            );
        }
        println!("{}", "-".repeat(60));
    }

    /// `OP from, to` without colour.
    pub fn format(&self, prog: &Prog) -> String {
        let operands = self.operands(prog);
        let op = self.arch.op_name(prog.op);
        if operands.is_empty() {
            op.to_string()
        } else {
            format!("{op} {operands}")
        }
    }

    fn operands(&self, prog: &Prog) -> String {
        let data = self.arch.pseudo_op(Pseudo::DATA);
        let flagged = [Pseudo::TEXT, Pseudo::GLOBL].map(|p| self.arch.pseudo_op(p));

        let mut from = self.operand(&prog.from);
        if prog.op == data {
            from = format!("{from}/{}", prog.from.scale);
        } else if flagged.contains(&prog.op) && prog.from.scale != 0 {
            from = format!("{from}, {}", prog.from.scale);
        }
        let to = self.operand(&prog.to);
        match (from.is_empty(), to.is_empty()) {
            (true, true) => String::new(),
            (false, true) => from,
            (true, false) => to,
            (false, false) => format!("{from}, {to}"),
        }
    }

    fn operand(&self, op: &Operand) -> String {
        let name = op
            .sym
            .and_then(|s| self.symbols.name(s))
            .unwrap_or("?");
        let off = if op.offset == 0 {
            String::new()
        } else {
            format!("{:+}", op.offset)
        };
        let mut s = match op.kind {
            Kind::None => String::new(),
            Kind::Reg(r) => self.arch.reg_name(r).to_string(),
            Kind::Indirect(Some(r)) => {
                let off = if op.offset == 0 {
                    String::new()
                } else {
                    op.offset.to_string()
                };
                format!("{off}({})", self.arch.reg_name(r))
            }
            Kind::Indirect(None) => op.offset.to_string(),
            Kind::Const => format!("${}", op.offset),
            Kind::FConst => match op.value {
                Value::Float(f) => format!("$({f:?})"),
                _ => "$(?)".to_string(),
            },
            Kind::SConst => match &op.value {
                Value::String(s) => format!("${s:?}"),
                _ => "$\"?\"".to_string(),
            },
            Kind::Branch => match (op.target(), op.sym) {
                (Some(id), _) => match self.program.get(id) {
                    Some(target) => format!("{}", target.pc),
                    None => "?".to_string(),
                },
                (None, Some(_)) => format!("{name}{off}(SB)"),
                (None, None) => op.offset.to_string(),
            },
            Kind::Extern => format!("{name}{off}(SB)"),
            Kind::Static => format!("{name}<>{off}(SB)"),
            Kind::Auto => format!("{name}{off}(SP)"),
            Kind::Param => format!("{name}{off}(FP)"),
            Kind::Address(SymClass::Extern) => format!("${name}{off}(SB)"),
            Kind::Address(SymClass::Static) => format!("${name}<>{off}(SB)"),
        };
        if let Some(index) = op.index {
            let index = self.arch.reg_name(index);
            if op.scale != 0 {
                s = format!("{s}({index}*{})", op.scale);
            } else {
                s = format!("{s}:{index}");
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::Input;
    use crate::parser::Parser;
    use arch::Target;

    #[test]
    fn formats_records() {
        let src = "\
TEXT ·add(SB), 7, $16-8
loop:
\tMOVQ a+0(FP), AX
\tLEAQ foo<>+4(SB)(CX*8), BX
\tMOVQ $msg(SB), DI
\tSHLQ $4, AX:DX
\tJNE loop
\tRET
DATA msg+0(SB)/4, $\"abcd\"
";
        let config = Config::new("t.s", Target::Amd64);
        let input = Input::from_source("t.s", src, &config).unwrap();
        let mut symbols = Symbols::new();
        let arch = Target::Amd64.table();
        let program = Parser::new(arch, input, &mut symbols, 10).parse().unwrap();

        let listing = Listing::new(arch, &program, &symbols);
        let lines: Vec<_> = program.iter().map(|(_, p)| listing.format(p)).collect();
        println!("{lines:#?}");
        assert_eq!(
            lines,
            vec![
                "TEXT .add(SB), 7, $34359738384",
                "MOVQ a(FP), AX",
                "LEAQ foo<>+4(SB)(CX*8), BX",
                "MOVQ $msg(SB), DI",
                "SHLQ $4:DX, AX",
                "JNE 2",
                "RET",
                "DATA msg(SB)/4, $\"abcd\"",
            ]
        );
    }
}
