// parser.rs

use crate::addr::{Addr, Shape};
use crate::error::{Diag, Error, Failure};
use crate::input::Input;
use crate::label::Labels;
use crate::operand::parse_operand;
use crate::prog::{Kind, Operand, Prog, ProgId, Program, SymClass, Value};
use crate::symbols::{SymbolKind, SymbolTable};
use crate::token::{LexToken, Token};
use arch::{ArchTable, Reg};
use tracing::{debug, trace};

/// Statement reader and record builder for one assembly run.
pub struct Parser<'a, S: SymbolTable> {
    pub(crate) arch: &'a ArchTable,
    input: Input,
    pub(crate) symbols: &'a mut S,
    max_errors: usize,
    /// Position of the first token of the current statement.
    file: String,
    line: usize,
    error_line: Option<(String, usize)>,
    errors: Vec<Diag>,
    fatal_at: Option<(String, usize)>,
    pub(crate) pc: i64,
    pending_labels: Vec<String>,
    pub(crate) labels: Labels,
    program: Program,
}

impl<'a, S: SymbolTable> Parser<'a, S> {
    pub fn new(arch: &'a ArchTable, input: Input, symbols: &'a mut S, max_errors: usize) -> Self {
        let file = input.file_name().to_string();
        Parser {
            arch,
            input,
            symbols,
            max_errors,
            file,
            line: 0,
            error_line: None,
            errors: vec![],
            fatal_at: None,
            pc: 0,
            pending_labels: vec![],
            labels: Labels::new(),
            program: Program::new(),
        }
    }

    /// Reads every statement, then resolves forward jumps. Recoverable
    /// errors are collected and reported together; a fatal one stops the
    /// run immediately.
    pub fn parse(mut self) -> Result<Program, Failure> {
        debug!(file = %self.file, "parse");
        loop {
            match self.statement() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_fatal() => return Err(self.abort(e)),
                Err(e) => {
                    if let Err(fatal) = self.report(e) {
                        return Err(self.abort(fatal));
                    }
                }
            }
        }

        if self.program.is_empty() && self.errors.is_empty() {
            let diag = Diag::new(self.file.clone(), self.line, Error::EmptyProgram);
            self.errors.push(diag);
        }
        if !self.errors.is_empty() {
            return Err(Failure::Rejected(self.errors));
        }

        let Parser {
            labels,
            mut program,
            ..
        } = self;
        debug!(patches = labels.pending(), "resolve labels");
        labels
            .resolve(&mut program)
            .map_err(|fatal| Failure::Aborted {
                fatal,
                earlier: vec![],
            })?;
        debug!(records = program.len(), "done");
        Ok(program)
    }

    fn abort(self, error: Error) -> Failure {
        let (file, line) = self.fatal_at.unwrap_or((self.file, self.line));
        Failure::Aborted {
            fatal: Diag::new(file, line, error),
            earlier: self.errors,
        }
    }

    /// Records an error for the current statement. Only the first error on a
    /// line is kept; going over the limit is fatal.
    pub(crate) fn report(&mut self, error: Error) -> Result<(), Error> {
        self.report_at(self.file.clone(), self.line, error)
    }

    fn report_at(&mut self, file: String, line: usize, error: Error) -> Result<(), Error> {
        let at = (file, line);
        if self.error_line.as_ref() == Some(&at) {
            return Ok(());
        }
        trace!(file = %at.0, line, %error, "error");
        self.errors.push(Diag::new(at.0.clone(), line, error));
        self.error_line = Some(at);
        if self.errors.len() > self.max_errors {
            return Err(Error::TooManyErrors);
        }
        Ok(())
    }

    /// Next token from the input. Lexical errors are reported and skipped.
    fn lex(&mut self) -> Result<Token, Error> {
        loop {
            match self.input.next() {
                Ok(token) => return Ok(token),
                Err(e) if e.is_fatal() => {
                    self.fatal_at = Some((self.input.file_name().to_string(), self.input.line()));
                    return Err(e);
                }
                Err(e) => {
                    let file = self.input.file_name().to_string();
                    let line = self.input.line();
                    self.report_at(file, line, e)?;
                }
            }
        }
    }

    fn mark(&mut self) {
        self.line = self.input.line();
        if self.file != self.input.file_name() {
            self.file = self.input.file_name().to_string();
        }
    }

    fn skip_line(&mut self) -> Result<(), Error> {
        while !self.lex()?.is_eol() {}
        Ok(())
    }

    /// One statement: `label:` or `WORD op, op, ...` up to a newline or `;`.
    /// Returns `false` at end of input.
    fn statement(&mut self) -> Result<bool, Error> {
        // 1. Skip blank lines
        let token = loop {
            let token = self.lex()?;
            self.mark();
            match token {
                Token::NEWLINE | Token::Char(';') => continue,
                Token::Eof => return Ok(false),
                _ => break token,
            }
        };

        if token != Token::Ident {
            let found = self.input.text().to_string();
            self.report(Error::Syntax(format!("expected identifier, found {found:?}")))?;
            self.skip_line()?;
            return Ok(true);
        }
        let word = self.input.text().to_string();

        // 2. Label or operands
        let mut operands: Vec<Vec<LexToken>> = vec![];
        let mut items = vec![];
        let mut first = true;
        loop {
            let token = self.lex()?;
            if first && token == Token::Char(':') {
                trace!(label = %word, "pending label");
                self.pending_labels.push(word);
                return Ok(true);
            }
            first = false;

            let end = token.is_eol();
            if end || token == Token::Char(',') {
                if !items.is_empty() {
                    operands.push(std::mem::take(&mut items));
                } else if !operands.is_empty() {
                    self.report(Error::MissingOperand)?;
                }
                if end {
                    break;
                }
                continue;
            }
            items.push(LexToken::new(token, self.input.text()));
        }

        // 3. Dispatch
        if let Some((pseudo, op)) = self.arch.pseudo(&word) {
            self.pseudo(pseudo, op, &word, &operands)?;
        } else if let Some(op) = self.arch.instruction(&word) {
            self.instruction(op, &word, &operands)?;
        } else {
            return Err(Error::UnknownInstruction(word));
        }
        Ok(true)
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn file(&self) -> &str {
        &self.file
    }

    pub(crate) fn address(&self, tokens: &[LexToken]) -> Result<Addr, Error> {
        parse_operand(self.arch, tokens)
    }

    /// Appends a record. Records that advance the virtual PC also take any
    /// labels waiting for the next instruction.
    pub(crate) fn link(&mut self, mut prog: Prog, do_label: bool) -> Result<ProgId, Error> {
        if do_label {
            self.pc += 1;
        }
        prog.pc = self.pc;
        let id = self.program.append(prog);
        if do_label {
            for label in std::mem::take(&mut self.pending_labels) {
                self.labels.define(label, id)?;
            }
        }
        Ok(id)
    }

    /// Addressing class of a symbol reference, chosen by its base register.
    pub(crate) fn symbol_kind(&self, a: &Addr) -> Result<Kind, Error> {
        let class = if a.is_static {
            SymClass::Static
        } else {
            SymClass::Extern
        };
        match a.register {
            Some(Reg::FP) => Ok(Kind::Param),
            Some(Reg::SP) => Ok(Kind::Auto),
            Some(Reg::SB) if a.is_immediate_address => Ok(Kind::Address(class)),
            Some(Reg::SB) if a.is_static => Ok(Kind::Static),
            Some(Reg::SB) => Ok(Kind::Extern),
            _ => Err(Error::Syntax(format!(
                "invalid register for symbol {}",
                a.symbol.as_deref().unwrap_or("")
            ))),
        }
    }

    /// Turns a parsed operand into the back end's operand form.
    pub(crate) fn resolve(&mut self, a: &Addr) -> Result<Operand, Error> {
        let mut out = Operand::none();
        if let Some(name) = &a.symbol {
            out.kind = self.symbol_kind(a)?;
            out.sym = Some(self.symbols.lookup_or_create(name, SymbolKind::Ref));
            if a.is_immediate_address && a.register != Some(Reg::SB) {
                return Err(Error::Syntax(format!(
                    "can't handle immediate address of {name} not (SB)"
                )));
            }
        } else if let Some(r) = a.register {
            let r = if r == Reg::SP {
                self.arch.hardware_sp()
            } else {
                r
            };
            out.kind = if a.is_indirect {
                Kind::Indirect(Some(r))
            } else {
                Kind::Reg(r)
            };
        }
        if let Some(index) = a.index {
            out.index = Some(index);
        }
        if let Some(scale) = a.scale {
            out.scale = scale;
        }
        if let Some(offset) = a.offset {
            out.offset = offset;
            if a.is(Shape::OFFSET) {
                out.kind = Kind::Indirect(None);
            } else if a.is_immediate_constant && out.kind == Kind::None {
                out.kind = Kind::Const;
            }
        }
        if let Some(f) = a.float {
            out.value = Value::Float(f);
            out.kind = Kind::FConst;
        }
        if let Some(s) = &a.string {
            out.value = Value::String(s.clone());
            out.kind = Kind::SConst;
        }
        if a.is_indirect && a.register.is_none() && a.index.is_some() {
            out.kind = Kind::Indirect(None);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::symbols::Symbols;
    use arch::Target;

    fn run(src: &str) -> (Result<Program, Failure>, Symbols) {
        let config = Config::new("test.s", Target::Amd64);
        let input = Input::from_source("test.s", src, &config).unwrap();
        let mut symbols = Symbols::new();
        let result = Parser::new(Target::Amd64.table(), input, &mut symbols, 10).parse();
        (result, symbols)
    }

    fn rejected(src: &str) -> Vec<String> {
        match run(src).0 {
            Err(Failure::Rejected(diags)) => diags.iter().map(|d| d.to_string()).collect(),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn one_error_per_line() {
        let diags = rejected("FROB AX\nMOVL AX, , BX\nNOP\nMOVL (AX)(BX), CX\n");
        assert_eq!(
            diags,
            vec![
                "test.s:1: unrecognized instruction `FROB`",
                "test.s:2: missing operand",
                "test.s:4: multiple indirections",
            ]
        );
    }

    #[test]
    fn too_many_errors() {
        let src = "FROB\n".repeat(12);
        match run(&src).0 {
            Err(Failure::Aborted { fatal, earlier }) => {
                assert!(matches!(fatal.error, Error::TooManyErrors));
                assert_eq!(earlier.len(), 11);
            }
            other => panic!("expected abort, got {other:?}"),
        }
    }

    #[test]
    fn statements_split_on_semicolons() {
        let (program, _) = run("NOP; NOP\n\nloop: NOP; RET\n");
        let program = program.unwrap();
        assert_eq!(program.len(), 4);
        let pcs: Vec<_> = program.iter().map(|(_, p)| p.pc).collect();
        assert_eq!(pcs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(rejected("// nothing"), vec!["test.s:1: no instructions"]);
    }

    #[test]
    fn resolve_sp_and_offsets() {
        let (program, _) = run("MOVQ 8(SP), AX\nMOVQ $1, 0x10\n");
        let program = program.unwrap();
        let arch = Target::Amd64.table();
        let progs: Vec<_> = program.iter().map(|(_, p)| p.clone()).collect();
        assert_eq!(progs[0].from.kind, Kind::Indirect(Some(arch.hardware_sp())));
        assert_eq!(progs[0].from.offset, 8);
        assert_eq!(progs[0].to.kind, Kind::Reg(arch.register("AX").unwrap()));
        assert_eq!(progs[1].from, Operand::constant(1));
        assert_eq!(progs[1].to.kind, Kind::Indirect(None));
        assert_eq!(progs[1].to.offset, 16);
    }
}
