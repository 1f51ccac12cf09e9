use crate::error::{Diag, Error};
use crate::prog::{Operand, ProgId, Program};
use indexmap::IndexMap;
use tracing::trace;

/// A jump whose label had not been seen yet when it was emitted.
#[derive(Debug, Clone)]
pub struct Patch {
    pub prog: ProgId,
    pub label: String,
    pub file: String,
    pub line: usize,
}

/// Label name -> record it marks, plus the forward references still open.
#[derive(Debug, Default)]
pub struct Labels {
    labels: IndexMap<String, ProgId>,
    patches: Vec<Patch>,
}

impl Labels {
    pub fn new() -> Self {
        Labels {
            labels: IndexMap::new(),
            patches: vec![],
        }
    }

    pub fn define(&mut self, name: String, prog: ProgId) -> Result<(), Error> {
        if self.labels.contains_key(&name) {
            return Err(Error::RedefinedLabel(name));
        }
        trace!(label = %name, prog = prog.0, "define label");
        self.labels.insert(name, prog);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<ProgId> {
        self.labels.get(name).copied()
    }

    pub fn defer(&mut self, patch: Patch) {
        self.patches.push(patch);
    }

    pub fn pending(&self) -> usize {
        self.patches.len()
    }

    /// Points every deferred jump at its label. Runs once, after the last
    /// statement; the first label still missing is fatal.
    pub fn resolve(self, program: &mut Program) -> Result<(), Diag> {
        for patch in self.patches {
            let Some(target) = self.labels.get(&patch.label).copied() else {
                return Err(Diag::new(patch.file, patch.line, Error::UndefinedLabel(patch.label)));
            };
            if let Some(prog) = program.get_mut(patch.prog) {
                prog.to = Operand::branch_to(target);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prog::Prog;
    use arch::As;

    fn patch(prog: ProgId, label: &str) -> Patch {
        Patch {
            prog,
            label: label.to_string(),
            file: "t.s".to_string(),
            line: 7,
        }
    }

    #[test]
    fn forward_reference() {
        let mut program = Program::new();
        let jmp = program.append(Prog::new(As(1), 1));
        let target = program.append(Prog::new(As(2), 2));

        let mut labels = Labels::new();
        labels.defer(patch(jmp, "done"));
        labels.define("done".to_string(), target).unwrap();
        assert_eq!(labels.pending(), 1);
        labels.resolve(&mut program).unwrap();
        assert_eq!(program.get(jmp).and_then(|p| p.to.target()), Some(target));
    }

    #[test]
    fn errors() {
        let mut labels = Labels::new();
        labels.define("a".to_string(), ProgId(0)).unwrap();
        assert!(matches!(
            labels.define("a".to_string(), ProgId(1)),
            Err(Error::RedefinedLabel(_))
        ));

        let mut program = Program::new();
        let jmp = program.append(Prog::new(As(1), 1));
        labels.defer(patch(jmp, "nowhere"));
        let diag = labels.resolve(&mut program).unwrap_err();
        assert_eq!(diag.line, 7);
        assert!(matches!(diag.error, Error::UndefinedLabel(_)));
    }
}
