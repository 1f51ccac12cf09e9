use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Opcode id: an index into the target's canonical opcode list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct As(pub u16);

impl As {
    /// Slot 0 of every opcode list; never names an instruction.
    pub const XXX: As = As(0);
}

/// Directives handled by dedicated emitters instead of the general
/// instruction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Serialize)]
pub enum Pseudo {
    TEXT,
    DATA,
    GLOBL,
    PCDATA,
    FUNCDATA,
}

impl Pseudo {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    /// DATA and GLOBL lay out memory; they neither advance the virtual PC
    /// nor take pending labels.
    pub fn advances_pc(self) -> bool {
        !matches!(self, Pseudo::DATA | Pseudo::GLOBL)
    }
}

#[test]
fn test() {
    assert_eq!(Pseudo::parse("GLOBL"), Some(Pseudo::GLOBL));
    assert_eq!(Pseudo::parse("globl"), None);
    assert!(Pseudo::TEXT.advances_pc());
    assert!(!Pseudo::DATA.advances_pc());
}
