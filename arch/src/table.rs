use crate::op::{As, Pseudo};
use crate::reg::{PseudoReg, Reg};
use crate::{amd64, x86, Target};
use bimap::BiMap;
use std::collections::{HashMap, HashSet};
use strum::IntoEnumIterator;

/// Lookup tables for one target. Built once, read-only afterwards.
#[derive(Debug)]
pub struct ArchTable {
    target: Target,
    instructions: BiMap<&'static str, As>,
    aliases: HashMap<&'static str, As>,
    pseudos: HashMap<Pseudo, As>,
    registers: HashMap<&'static str, Reg>,
    register_names: &'static [&'static str],
    hardware_sp: Reg,
    jumps: HashSet<As>,
    unary_destination: HashSet<As>,
}

struct Source {
    registers: &'static [&'static str],
    opcodes: &'static [&'static str],
    aliases: &'static [(&'static str, &'static str)],
    unary_destination: &'static [&'static str],
}

impl ArchTable {
    pub(crate) fn build(target: Target) -> Self {
        let src = match target {
            Target::I386 => Source {
                registers: x86::REGISTERS,
                opcodes: x86::OPCODES,
                aliases: x86::ALIASES,
                unary_destination: x86::UNARY_DESTINATION,
            },
            Target::Amd64 => Source {
                registers: amd64::REGISTERS,
                opcodes: amd64::OPCODES,
                aliases: amd64::ALIASES,
                unary_destination: amd64::UNARY_DESTINATION,
            },
        };

        let mut instructions = BiMap::new();
        for (idx, name) in src.opcodes.iter().enumerate() {
            instructions.insert(*name, As(idx as u16));
        }
        let canonical = |name: &str| -> As {
            match instructions.get_by_left(name) {
                Some(op) => *op,
                None => panic!("{target}: `{name}` is not in the opcode list"),
            }
        };

        let aliases = src
            .aliases
            .iter()
            .map(|(alias, name)| (*alias, canonical(name)))
            .collect();

        let pseudos = Pseudo::iter()
            .map(|p| (p, canonical(&p.to_string())))
            .collect();

        let unary_destination = src
            .unary_destination
            .iter()
            .map(|name| canonical(name))
            .collect();

        let jumps = src
            .opcodes
            .iter()
            .filter(|name| name.starts_with('J') || **name == "CALL")
            .map(|name| canonical(name))
            .collect();

        let mut registers = HashMap::new();
        let mut hardware_sp = Reg::SP;
        for (idx, name) in src.registers.iter().enumerate() {
            if *name == "SP" {
                hardware_sp = Reg(idx as i16);
            }
            registers.insert(*name, Reg(idx as i16));
        }
        // Pseudo-registers shadow hardware names (SP in particular).
        for r in PseudoReg::iter() {
            registers.insert(pseudo_name(r), r.into());
        }

        ArchTable {
            target,
            instructions,
            aliases,
            pseudos,
            registers,
            register_names: src.registers,
            hardware_sp,
            jumps,
            unary_destination,
        }
    }
}

fn pseudo_name(r: PseudoReg) -> &'static str {
    match r {
        PseudoReg::FP => "FP",
        PseudoReg::SB => "SB",
        PseudoReg::SP => "SP",
        PseudoReg::PC => "PC",
    }
}

impl ArchTable {
    pub fn target(&self) -> Target {
        self.target
    }

    /// Mnemonic lookup. Aliases take precedence over canonical names.
    pub fn instruction(&self, name: &str) -> Option<As> {
        self.aliases
            .get(name)
            .or_else(|| self.instructions.get_by_left(name))
            .copied()
            .filter(|op| *op != As::XXX)
    }

    pub fn pseudo(&self, name: &str) -> Option<(Pseudo, As)> {
        let pseudo = Pseudo::parse(name)?;
        self.pseudos.get(&pseudo).map(|op| (pseudo, *op))
    }

    pub fn pseudo_op(&self, pseudo: Pseudo) -> As {
        self.pseudos.get(&pseudo).copied().unwrap_or(As::XXX)
    }

    pub fn register(&self, name: &str) -> Option<Reg> {
        self.registers.get(name).copied()
    }

    /// The real stack pointer, as opposed to the `SP` pseudo-register.
    pub fn hardware_sp(&self) -> Reg {
        self.hardware_sp
    }

    pub fn is_jump(&self, op: As) -> bool {
        self.jumps.contains(&op)
    }

    pub fn is_unary_destination(&self, op: As) -> bool {
        self.unary_destination.contains(&op)
    }

    pub fn op_name(&self, op: As) -> &'static str {
        self.instructions.get_by_right(&op).copied().unwrap_or("???")
    }

    pub fn reg_name(&self, r: Reg) -> &'static str {
        match r.pseudo() {
            Some(p) => pseudo_name(p),
            None => self.register_names.get(r.0 as usize).copied().unwrap_or("R?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical() {
        let t = ArchTable::build(Target::Amd64);
        assert_eq!(t.instruction("JZ"), t.instruction("JEQ"));
        assert_eq!(t.instruction("MOVD"), t.instruction("MOVQ"));
        assert_eq!(t.op_name(t.instruction("JA").unwrap()), "JHI");
        assert_eq!(t.instruction("XXX"), None);
        assert_eq!(t.instruction("FROB"), None);

        let t = ArchTable::build(Target::I386);
        assert_eq!(t.instruction("JNO"), t.instruction("JOC"));
        assert_eq!(t.instruction("MOVOA"), t.instruction("MOVO"));
        assert!(t.instruction("MOVQ").is_some());
        assert_eq!(t.instruction("MOVLQSX"), None);
    }

    #[test]
    fn pseudo_registers_shadow_hardware() {
        let t = ArchTable::build(Target::Amd64);
        assert_eq!(t.register("SB"), Some(Reg::SB));
        assert_eq!(t.register("SP"), Some(Reg::SP));
        assert_eq!(t.reg_name(t.hardware_sp()), "SP");
        assert!(!t.hardware_sp().is_pseudo());
        assert_eq!(t.register("R15").map(|r| t.reg_name(r)), Some("R15"));
        assert_eq!(ArchTable::build(Target::I386).register("R15"), None);
    }

    #[test]
    fn sets() {
        for target in Target::iter() {
            let t = ArchTable::build(target);
            let op = |s: &str| t.instruction(s).unwrap();
            assert!(t.is_jump(op("JMP")));
            assert!(t.is_jump(op("CALL")));
            assert!(t.is_jump(op("JNZ")));
            assert!(!t.is_jump(op("MOVL")));
            assert!(t.is_unary_destination(op("INCL")));
            assert!(t.is_unary_destination(op("SETEQ")));
            assert!(!t.is_unary_destination(op("PUSHL")));
            for p in Pseudo::iter() {
                assert_eq!(t.pseudo(&p.to_string()).map(|(_, op)| op), Some(t.pseudo_op(p)));
                assert_ne!(t.pseudo_op(p), As::XXX);
            }
        }
    }
}
