//! Front end of a Plan 9 style assembler for 386 and amd64.
//!
//! Source text goes through the preprocessing [`input::Input`] stack, each
//! statement is parsed by [`parser::Parser`], and the result is a linked
//! [`prog::Program`] of architecture-neutral records with every branch
//! resolved.

pub mod addr;
pub mod config;
pub mod error;
mod inst;
pub mod input;
pub mod label;
pub mod lexer;
pub mod listing;
pub mod operand;
pub mod parser;
pub mod prog;
mod pseudo;
pub mod symbols;
pub mod token;

pub use config::Config;
pub use error::{Diag, Error, Failure};
pub use prog::{Kind, Operand, Prog, ProgId, Program};
pub use symbols::{SymbolHandle, SymbolKind, SymbolTable, Symbols};

use input::Input;
use parser::Parser;
use tracing::info;

/// Assembles `config.input` for `config.target`, reporting symbols to
/// `symbols`.
pub fn assemble<S: SymbolTable>(config: &Config, symbols: &mut S) -> Result<Program, Failure> {
    info!(input = %config.input.display(), target = %config.target, "assemble");
    let input = Input::open(config).map_err(|e| Failure::Aborted {
        fatal: Diag::new(config.input.display().to_string(), 0, e),
        earlier: vec![],
    })?;
    let arch = config.target.table();
    Parser::new(arch, input, symbols, config.max_errors).parse()
}
