// prog.rs

use crate::symbols::SymbolHandle;
use arch::{As, Reg};
use serde::Serialize;

/// Whether a symbol reference uses the file-local (`name<>`) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymClass {
    Extern,
    Static,
}

/// How the back end must read an [`Operand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Kind {
    #[default]
    None,
    Reg(Reg),
    /// Memory at `offset` from the register, or absolute when `None`.
    Indirect(Option<Reg>),
    Const,
    FConst,
    SConst,
    Branch,
    Extern,
    Static,
    /// Relative to the pseudo stack pointer.
    Auto,
    /// Relative to the frame pointer.
    Param,
    /// `$sym(SB)`: the address of a symbol, not its contents.
    Address(SymClass),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum Value {
    #[default]
    None,
    Float(f64),
    String(String),
    /// A branch resolved to another record of the same program.
    Target(ProgId),
}

/// Operand as handed to the back end.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Operand {
    pub kind: Kind,
    pub index: Option<Reg>,
    pub scale: i8,
    pub offset: i64,
    pub sym: Option<SymbolHandle>,
    pub value: Value,
}

impl Operand {
    /// The empty operand, used for unused from/to slots.
    pub fn none() -> Self {
        Operand::default()
    }

    pub fn is_none(&self) -> bool {
        *self == Operand::default()
    }

    pub fn reg(r: Reg) -> Self {
        Operand {
            kind: Kind::Reg(r),
            ..Default::default()
        }
    }

    pub fn constant(offset: i64) -> Self {
        Operand {
            kind: Kind::Const,
            offset,
            ..Default::default()
        }
    }

    pub fn branch_to(target: ProgId) -> Self {
        Operand {
            kind: Kind::Branch,
            value: Value::Target(target),
            ..Default::default()
        }
    }

    pub fn target(&self) -> Option<ProgId> {
        match self.value {
            Value::Target(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProgId(pub usize);

/// One instruction or pseudo-op record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prog {
    pub op: As,
    pub from: Operand,
    pub to: Operand,
    pub line: usize,
    /// Virtual PC: position among the records that advance it.
    pub pc: i64,
    pub link: Option<ProgId>,
}

impl Prog {
    pub fn new(op: As, line: usize) -> Self {
        Prog {
            op,
            from: Operand::none(),
            to: Operand::none(),
            line,
            pc: 0,
            link: None,
        }
    }
}

/// Records in emission order. `link` chains each record to the next, so the
/// list can be handed over as a singly linked sequence.
#[derive(Debug, Default, Serialize)]
pub struct Program {
    progs: Vec<Prog>,
}

impl Program {
    pub fn new() -> Self {
        Program { progs: vec![] }
    }

    pub fn append(&mut self, prog: Prog) -> ProgId {
        let id = ProgId(self.progs.len());
        if let Some(last) = self.progs.last_mut() {
            last.link = Some(id);
        }
        self.progs.push(prog);
        id
    }

    pub fn first(&self) -> Option<ProgId> {
        (!self.progs.is_empty()).then_some(ProgId(0))
    }

    pub fn get(&self, id: ProgId) -> Option<&Prog> {
        self.progs.get(id.0)
    }

    pub fn get_mut(&mut self, id: ProgId) -> Option<&mut Prog> {
        self.progs.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.progs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.progs.is_empty()
    }

    /// Walks the `link` chain from the first record.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            program: self,
            next: self.first(),
        }
    }
}

pub struct Iter<'a> {
    program: &'a Program,
    next: Option<ProgId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ProgId, &'a Prog);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let prog = self.program.get(id)?;
        self.next = prog.link;
        Some((id, prog))
    }
}
