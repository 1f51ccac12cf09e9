use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Register id. Hardware registers are indices into the target's register
/// list (`>= 0`); pseudo-registers are small negative numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reg(pub i16);

/// Architecture-independent symbolic registers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(i16)]
pub enum PseudoReg {
    FP = -1,
    SB = -2,
    SP = -3,
    PC = -4,
}

impl Reg {
    pub const FP: Reg = Reg(PseudoReg::FP as i16);
    pub const SB: Reg = Reg(PseudoReg::SB as i16);
    pub const SP: Reg = Reg(PseudoReg::SP as i16);
    pub const PC: Reg = Reg(PseudoReg::PC as i16);

    pub fn pseudo(self) -> Option<PseudoReg> {
        PseudoReg::try_from(self.0).ok()
    }

    pub fn is_pseudo(self) -> bool {
        self.pseudo().is_some()
    }
}

impl From<PseudoReg> for Reg {
    fn from(r: PseudoReg) -> Self {
        Reg(r.into())
    }
}

#[test]
fn test() {
    assert_eq!(Reg::SB.pseudo(), Some(PseudoReg::SB));
    assert_eq!(Reg(3).pseudo(), None);
    assert_eq!("PC".parse::<PseudoReg>().map(Reg::from), Ok(Reg::PC));
    assert!(Reg::FP.0 < 0 && Reg::PC.0 < 0);
}
