// addr.rs

use arch::Reg;
use std::ops::BitOr;

/// Which parts of an [`Addr`] are present. Used to match an operand against
/// the exact shape an emitter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shape(u16);

impl Shape {
    pub const NONE: Shape = Shape(0);
    pub const IMMEDIATE_CONSTANT: Shape = Shape(1 << 0);
    pub const IMMEDIATE_ADDRESS: Shape = Shape(1 << 1);
    pub const INDIRECT: Shape = Shape(1 << 2);
    pub const SYMBOL: Shape = Shape(1 << 3);
    pub const REGISTER: Shape = Shape(1 << 4);
    pub const REGISTER2: Shape = Shape(1 << 5);
    pub const OFFSET: Shape = Shape(1 << 6);
    pub const FLOAT: Shape = Shape(1 << 7);
    pub const STRING: Shape = Shape(1 << 8);
    pub const INDEX: Shape = Shape(1 << 9);
    pub const SCALE: Shape = Shape(1 << 10);

    const FLAGS: Shape = Shape(Self::IMMEDIATE_CONSTANT.0 | Self::IMMEDIATE_ADDRESS.0 | Self::INDIRECT.0);
}

impl BitOr for Shape {
    type Output = Shape;

    fn bitor(self, rhs: Shape) -> Shape {
        Shape(self.0 | rhs.0)
    }
}

/// One parsed operand, before it is resolved against registers and
/// symbols. `is_static` (the `<>` suffix) is not part of the shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Addr {
    pub is_static: bool,
    pub is_immediate_constant: bool,
    pub is_immediate_address: bool,
    pub is_indirect: bool,
    pub symbol: Option<String>,
    pub register: Option<Reg>,
    pub register2: Option<Reg>,
    pub offset: Option<i64>,
    pub float: Option<f64>,
    pub string: Option<String>,
    pub index: Option<Reg>,
    pub scale: Option<i8>,
}

impl Addr {
    pub fn shape(&self) -> Shape {
        let parts = [
            (self.is_immediate_constant, Shape::IMMEDIATE_CONSTANT),
            (self.is_immediate_address, Shape::IMMEDIATE_ADDRESS),
            (self.is_indirect, Shape::INDIRECT),
            (self.symbol.is_some(), Shape::SYMBOL),
            (self.register.is_some(), Shape::REGISTER),
            (self.register2.is_some(), Shape::REGISTER2),
            (self.offset.is_some(), Shape::OFFSET),
            (self.float.is_some(), Shape::FLOAT),
            (self.string.is_some(), Shape::STRING),
            (self.index.is_some(), Shape::INDEX),
            (self.scale.is_some(), Shape::SCALE),
        ];
        parts
            .into_iter()
            .filter(|(present, _)| *present)
            .fold(Shape::NONE, |acc, (_, s)| acc | s)
    }

    /// Exactly these parts are present, nothing more.
    pub fn is(&self, shape: Shape) -> bool {
        self.shape() == shape
    }

    /// At least one of the value-carrying parts in `shape` is present. The
    /// immediate and indirect flags are ignored.
    pub fn has(&self, shape: Shape) -> bool {
        self.shape().0 & shape.0 & !Shape::FLAGS.0 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        let none = Addr::default();
        assert!(none.is(Shape::NONE));

        let sym = Addr {
            symbol: Some("foo".to_string()),
            register: Some(Reg::SB),
            is_indirect: true,
            is_static: true,
            ..Default::default()
        };
        assert!(sym.is(Shape::SYMBOL | Shape::REGISTER | Shape::INDIRECT));
        assert!(!sym.is(Shape::SYMBOL | Shape::REGISTER));
        assert!(sym.has(Shape::REGISTER | Shape::FLOAT));
        assert!(!sym.has(Shape::INDIRECT | Shape::OFFSET));

        let imm = Addr {
            is_immediate_constant: true,
            offset: Some(8),
            ..Default::default()
        };
        assert!(imm.is(Shape::IMMEDIATE_CONSTANT | Shape::OFFSET));
        assert!(!imm.is(Shape::OFFSET));
    }
}
