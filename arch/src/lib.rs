pub mod op;
pub mod reg;
pub mod table;

mod amd64;
mod x86;

pub use op::{As, Pseudo};
pub use reg::{PseudoReg, Reg};
pub use table::ArchTable;

use once_cell::sync::Lazy;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unrecognized architecture `{0}`")]
    UnsupportedArchitecture(String),
}

/// Supported target machines, named by their GOARCH-style ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Serialize)]
pub enum Target {
    #[strum(serialize = "386")]
    #[serde(rename = "386")]
    I386,
    #[strum(serialize = "amd64")]
    #[serde(rename = "amd64")]
    Amd64,
}

static I386: Lazy<ArchTable> = Lazy::new(|| ArchTable::build(Target::I386));
static AMD64: Lazy<ArchTable> = Lazy::new(|| ArchTable::build(Target::Amd64));

impl Target {
    pub fn table(self) -> &'static ArchTable {
        match self {
            Target::I386 => &I386,
            Target::Amd64 => &AMD64,
        }
    }
}

/// Picks the table for a target id such as `amd64` or `386`.
pub fn select(id: &str) -> Result<&'static ArchTable, Error> {
    id.parse::<Target>()
        .map(Target::table)
        .map_err(|_| Error::UnsupportedArchitecture(id.to_string()))
}

#[test]
fn test() {
    assert_eq!(select("amd64").map(|t| t.target()), Ok(Target::Amd64));
    assert_eq!(select("386").map(|t| t.target()), Ok(Target::I386));
    assert_eq!(
        select("arm").map(|t| t.target()),
        Err(Error::UnsupportedArchitecture("arm".to_string()))
    );
    assert_eq!(Target::I386.to_string(), "386");
}
