use crate::input::MAX_DEPTH;
use arch::Target;
use std::path::PathBuf;

/// Everything one assembly run needs besides the symbol table.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub target: Target,
    /// `name` or `name=value`, as given to `-D`.
    pub defines: Vec<String>,
    pub includes: Vec<PathBuf>,
    /// Substituted for `_GOOS` in `#include` names.
    pub goos: String,
    /// Errors tolerated before the run is aborted.
    pub max_errors: usize,
    pub max_depth: usize,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, target: Target) -> Self {
        Config {
            input: input.into(),
            target,
            defines: vec![],
            includes: vec![],
            goos: std::env::consts::OS.to_string(),
            max_errors: 10,
            max_depth: MAX_DEPTH,
        }
    }
}
