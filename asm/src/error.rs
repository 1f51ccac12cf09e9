use color_print::{ceprintln, cformat};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // ------------------------------------------------------------------
    // Recoverable: reported once per line, parsing continues

    #[error("{0}")]
    Lexical(String),

    #[error("{0}")]
    Syntax(String),

    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },

    #[error("unrecognized instruction `{0}`")]
    UnknownInstruction(String),

    #[error("missing operand")]
    MissingOperand,

    #[error("expected register; found {0}")]
    ExpectedRegister(String),

    #[error("multiple indirections")]
    MultipleIndirections,

    #[error("bad scale: {0}")]
    BadScale(String),

    #[error("overflow in constant: {0}+{1}")]
    Overflow(u64, u64),

    #[error("division by zero in constant expression")]
    DivisionByZero,

    #[error("expect {expected} operands for {op}")]
    OperandCount { op: String, expected: &'static str },

    #[error("{op}: {reason}: {operand}")]
    BadOperand {
        op: String,
        reason: &'static str,
        operand: String,
    },

    #[error("register pair operand on RHS must have register on LHS")]
    RegisterPair,

    #[error("no instructions")]
    EmptyProgram,

    // ------------------------------------------------------------------
    // Fatal: assembly stops here

    #[error(transparent)]
    Architecture(#[from] arch::Error),

    #[error("{0}")]
    Directive(String),

    #[error("'#' must be first item on line")]
    MisplacedHash,

    #[error("unexpected identifier after '#': {0}")]
    UnknownDirective(String),

    #[error("no definition for macro: {0}")]
    NoDefinition(String),

    #[error("bad definition for macro: {0}")]
    BadDefinition(String),

    #[error("duplicate argument `{arg}` in definition for macro: {name}")]
    DuplicateArgument { name: String, arg: String },

    #[error("can only escape \\ or \\n in definition for macro: {0}")]
    BadEscape(String),

    #[error("redefinition of macro: {0}")]
    RedefinedMacro(String),

    #[error("#undef for undefined macro: {0}")]
    UndefinedMacro(String),

    #[error("missing arguments for invocation of macro: {0}")]
    MissingArguments(String),

    #[error("unterminated arg list invoking macro: {0}")]
    UnterminatedArguments(String),

    #[error("too many arguments for macro: {0}")]
    TooManyArguments(String),

    #[error("too few arguments for macro: {0}")]
    TooFewArguments(String),

    #[error("unmatched #else")]
    UnmatchedElse,

    #[error("unmatched #endif")]
    UnmatchedEndif,

    #[error("#include {0}: {1}")]
    Include(String, #[source] std::io::Error),

    #[error("failed to open {0}: {1}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("input recursion")]
    InputRecursion,

    #[error("bad -D definition: {0}")]
    BadPredefine(String),

    #[error("too many errors")]
    TooManyErrors,

    #[error("label `{0}` multiply defined")]
    RedefinedLabel(String),

    #[error("undefined label `{0}`")]
    UndefinedLabel(String),
}

impl Error {
    /// Fatal errors stop the assembly at once; the rest are collected and
    /// reported together once the whole input has been read.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::Lexical(_)
                | Error::Syntax(_)
                | Error::Expected { .. }
                | Error::UnknownInstruction(_)
                | Error::MissingOperand
                | Error::ExpectedRegister(_)
                | Error::MultipleIndirections
                | Error::BadScale(_)
                | Error::Overflow(..)
                | Error::DivisionByZero
                | Error::OperandCount { .. }
                | Error::BadOperand { .. }
                | Error::RegisterPair
                | Error::EmptyProgram
        )
    }

    pub(crate) fn expected(expected: impl fmt::Display, found: impl Into<String>) -> Self {
        Error::Expected {
            expected: expected.to_string(),
            found: found.into(),
        }
    }
}

/// An error pinned to the source position it was reported at.
#[derive(Debug)]
pub struct Diag {
    pub file: String,
    pub line: usize,
    pub error: Error,
}

impl Diag {
    pub fn new(file: impl Into<String>, line: usize, error: Error) -> Self {
        Diag {
            file: file.into(),
            line,
            error,
        }
    }

    /// Print error with its location, coloured for the terminal.
    pub fn print(&self) {
        let level = if self.error.is_fatal() {
            cformat!("<red,bold>fatal</>")
        } else {
            cformat!("<red,bold>error</>")
        };
        ceprintln!("<underline>{}:{}</>: {}: {}", self.file, self.line, level, self.error);
    }
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.error)
    }
}

/// Why no program came out of an assembly run.
#[derive(Error, Debug)]
pub enum Failure {
    /// The whole input was read but some statements were rejected.
    #[error("{} error(s)", .0.len())]
    Rejected(Vec<Diag>),

    /// A fatal error stopped the run; `earlier` holds what was reported
    /// before it.
    #[error("{fatal}")]
    Aborted { fatal: Diag, earlier: Vec<Diag> },
}

impl Failure {
    pub fn diags(&self) -> Vec<&Diag> {
        match self {
            Failure::Rejected(diags) => diags.iter().collect(),
            Failure::Aborted { fatal, earlier } => {
                earlier.iter().chain(std::iter::once(fatal)).collect()
            }
        }
    }

    pub fn fatal(&self) -> Option<&Diag> {
        match self {
            Failure::Rejected(_) => None,
            Failure::Aborted { fatal, .. } => Some(fatal),
        }
    }

    pub fn print_diag(&self) {
        for diag in self.diags() {
            diag.print();
        }
    }
}
