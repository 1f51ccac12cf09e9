// input.rs

use crate::config::Config;
use crate::error::Error;
use crate::lexer::{tokenize, unquote, Tokenizer};
use crate::token::{LexToken, Token};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Frames deeper than this abort with "input recursion".
pub const MAX_DEPTH: usize = 100;

#[derive(Debug, Clone)]
pub struct Macro {
    pub name: String,
    /// `None` for an object-like macro, `Some` (possibly empty) when the
    /// definition had a parenthesized formal list.
    pub args: Option<Vec<String>>,
    pub tokens: Vec<LexToken>,
}

/// Pre-expanded tokens of one macro invocation, attributed to the place the
/// macro was invoked from.
#[derive(Debug)]
pub struct Replay {
    tokens: Vec<LexToken>,
    next: usize,
    file: String,
    line: usize,
}

impl Replay {
    fn new(file: String, line: usize, tokens: Vec<LexToken>) -> Self {
        Replay {
            tokens,
            next: 0,
            file,
            line,
        }
    }

    fn next(&mut self) -> Token {
        self.next += 1;
        self.tokens
            .get(self.next - 1)
            .map(|t| t.token)
            .unwrap_or(Token::Eof)
    }

    fn text(&self) -> &str {
        match self.next.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(t) => &t.text,
            None => "",
        }
    }
}

#[derive(Debug)]
pub enum Frame {
    File(Tokenizer),
    Replay(Replay),
}

impl Frame {
    fn next(&mut self) -> Result<Token, Error> {
        match self {
            Frame::File(t) => t.next(),
            Frame::Replay(r) => Ok(r.next()),
        }
    }

    fn text(&self) -> &str {
        match self {
            Frame::File(t) => t.text(),
            Frame::Replay(r) => r.text(),
        }
    }

    fn line(&self) -> usize {
        match self {
            Frame::File(t) => t.line(),
            Frame::Replay(r) => r.line,
        }
    }

    fn file_name(&self) -> &str {
        match self {
            Frame::File(t) => t.file_name(),
            Frame::Replay(r) => &r.file,
        }
    }

    fn set_pos(&mut self, line: usize, file: &str) {
        match self {
            Frame::File(t) => t.set_pos(line, file),
            Frame::Replay(r) => {
                r.line = line;
                r.file = file.to_string();
            }
        }
    }
}

/// Token source for the statement reader: a stack of frames with the
/// preprocessor directives applied. Macro expansion is token splicing, so
/// no text is ever rescanned.
#[derive(Debug)]
pub struct Input {
    frames: Vec<Frame>,
    primary_dir: PathBuf,
    include_dirs: Vec<PathBuf>,
    goos: String,
    goarch: String,
    max_depth: usize,
    beginning_of_line: bool,
    conds: Vec<bool>,
    macros: IndexMap<String, Macro>,
}

impl Input {
    /// Opens the primary file named by the config.
    pub fn open(config: &Config) -> Result<Self, Error> {
        let tokenizer = Tokenizer::open(&config.input)
            .map_err(|e| Error::FileOpen(config.input.display().to_string(), e))?;
        Input::with_tokenizer(tokenizer, config)
    }

    /// Reads the primary file from memory; `#include` still resolves
    /// against `name`'s directory.
    pub fn from_source(name: &str, src: &str, config: &Config) -> Result<Self, Error> {
        Input::with_tokenizer(Tokenizer::new(name, src), config)
    }

    fn with_tokenizer(tokenizer: Tokenizer, config: &Config) -> Result<Self, Error> {
        let primary_dir = Path::new(tokenizer.file_name())
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut input = Input {
            frames: vec![Frame::File(tokenizer)],
            primary_dir,
            include_dirs: config.includes.clone(),
            goos: config.goos.clone(),
            goarch: config.target.to_string(),
            max_depth: config.max_depth,
            beginning_of_line: true,
            conds: vec![],
            macros: IndexMap::new(),
        };
        for define in &config.defines {
            input.predefine(define)?;
        }
        Ok(input)
    }

    /// `-D name` or `-D name=value`; the value defaults to `1`.
    fn predefine(&mut self, define: &str) -> Result<(), Error> {
        let (name, value) = match define.find('=') {
            Some(i) if i > 0 => (&define[..i], &define[i + 1..]),
            _ => (define, "1"),
        };
        let bad = || Error::BadPredefine(define.to_string());
        let name_tokens = tokenize(name).map_err(|_| bad())?;
        if name_tokens.len() != 1 || name_tokens[0].token != Token::Ident {
            return Err(bad());
        }
        let tokens = tokenize(value).map_err(|_| bad())?;
        debug!(name, value, "predefine");
        self.define_macro(name.to_string(), None, tokens)
    }

    pub fn text(&self) -> &str {
        self.frames.last().map(Frame::text).unwrap_or("")
    }

    pub fn line(&self) -> usize {
        self.frames.last().map(Frame::line).unwrap_or(0)
    }

    pub fn file_name(&self) -> &str {
        self.frames.last().map(Frame::file_name).unwrap_or("")
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn including(&self) -> bool {
        self.conds.last().copied().unwrap_or(true)
    }

    /// Next token after directives and macro expansion. Lexical errors are
    /// passed through and may be skipped; everything else is fatal. Text in
    /// a false conditional is dropped, errors included.
    pub fn next(&mut self) -> Result<Token, Error> {
        loop {
            let token = match self.raw_next() {
                Ok(token) => token,
                Err(Error::Lexical(_)) if !self.including() => {
                    self.beginning_of_line = false;
                    continue;
                }
                Err(e) => return Err(e),
            };
            match token {
                Token::Char('#') if self.beginning_of_line => {
                    self.beginning_of_line = self.hash()?;
                }
                Token::Char('#') if self.including() => return Err(Error::MisplacedHash),
                Token::Ident if self.including() && self.is_defined(self.text()) => {
                    let name = self.text().to_string();
                    self.invoke(&name)?;
                }
                _ => {
                    self.beginning_of_line = token == Token::NEWLINE;
                    if self.including() {
                        return Ok(token);
                    }
                }
            }
        }
    }

    /// Next token from the frame stack, popping frames as they run dry. The
    /// bottom frame is never popped so end of input repeats.
    fn raw_next(&mut self) -> Result<Token, Error> {
        loop {
            let Some(top) = self.frames.last_mut() else {
                return Ok(Token::Eof);
            };
            let token = top.next()?;
            if token == Token::Eof && self.frames.len() > 1 {
                if let Some(Frame::File(t)) = self.frames.pop() {
                    debug!(file = t.file_name(), "end of include");
                }
                continue;
            }
            return Ok(token);
        }
    }

    fn push(&mut self, frame: Frame) -> Result<(), Error> {
        if self.frames.len() > self.max_depth {
            return Err(Error::InputRecursion);
        }
        self.frames.push(frame);
        Ok(())
    }

    fn expected(&self, what: &str) -> Error {
        Error::Directive(format!("{what}; got {:?}", self.text()))
    }

    fn expect_newline(&mut self, directive: &str) -> Result<(), Error> {
        match self.raw_next()? {
            Token::NEWLINE | Token::Eof => Ok(()),
            _ => Err(self.expected(&format!("expected newline after {directive}"))),
        }
    }

    fn macro_name(&mut self) -> Result<String, Error> {
        match self.raw_next()? {
            Token::Ident => Ok(self.text().to_string()),
            _ => Err(self.expected("expected identifier after '#'")),
        }
    }

    /// Handles one directive, the `#` already consumed. Returns whether the
    /// reader is left at the beginning of a line.
    fn hash(&mut self) -> Result<bool, Error> {
        if self.raw_next()? != Token::Ident {
            return Err(self.expected("expected identifier after '#'"));
        }
        let directive = self.text().to_string();

        if !self.including() {
            match directive.as_str() {
                "else" | "endif" | "line" => {}
                // Nested conditionals inside a skipped region stay skipped.
                "ifdef" | "ifndef" => {
                    self.macro_name()?;
                    self.expect_newline(&format!("#{directive}"))?;
                    self.conds.push(false);
                    return Ok(true);
                }
                _ => return Ok(false),
            }
        }

        match directive.as_str() {
            "define" => self.define()?,
            "else" => self.else_()?,
            "endif" => self.endif()?,
            "ifdef" => self.ifdef(true)?,
            "ifndef" => self.ifdef(false)?,
            "include" => self.include()?,
            "line" => self.line_directive()?,
            "undef" => self.undef()?,
            _ => return Err(Error::UnknownDirective(directive)),
        }
        Ok(true)
    }

    fn define(&mut self) -> Result<(), Error> {
        let name = self.macro_name()?;
        let (args, tokens) = self.macro_definition(&name)?;
        self.define_macro(name, args, tokens)
    }

    fn define_macro(
        &mut self,
        name: String,
        args: Option<Vec<String>>,
        tokens: Vec<LexToken>,
    ) -> Result<(), Error> {
        if self.macros.contains_key(&name) {
            return Err(Error::RedefinedMacro(name));
        }
        debug!(%name, "#define");
        let m = Macro {
            name: name.clone(),
            args,
            tokens,
        };
        self.macros.insert(name, m);
        Ok(())
    }

    /// Formal list and body of a `#define`, up to and including the newline.
    /// A backslash may escape a newline (joining lines) or another backslash.
    fn macro_definition(
        &mut self,
        name: &str,
    ) -> Result<(Option<Vec<String>>, Vec<LexToken>), Error> {
        let mut token = self.raw_next()?;
        if token == Token::NEWLINE || token == Token::Eof {
            return Err(Error::NoDefinition(name.to_string()));
        }

        let mut args = None;
        if token == Token::Char('(') {
            let mut formals: Vec<String> = vec![];
            token = self.raw_next()?;
            if token != Token::Char(')') {
                loop {
                    if token != Token::Ident {
                        return Err(Error::BadDefinition(name.to_string()));
                    }
                    let arg = self.text().to_string();
                    if formals.contains(&arg) {
                        return Err(Error::DuplicateArgument {
                            name: name.to_string(),
                            arg,
                        });
                    }
                    formals.push(arg);
                    match self.raw_next()? {
                        Token::Char(',') => token = self.raw_next()?,
                        Token::Char(')') => break,
                        _ => return Err(Error::BadDefinition(name.to_string())),
                    }
                }
            }
            args = Some(formals);
            token = self.raw_next()?;
        }

        let mut tokens = vec![];
        while token != Token::NEWLINE && token != Token::Eof {
            if token == Token::Char('\\') {
                token = self.raw_next()?;
                match token {
                    Token::NEWLINE => {
                        token = self.raw_next()?;
                        continue;
                    }
                    Token::Char('\\') => {}
                    _ => return Err(Error::BadEscape(name.to_string())),
                }
            }
            tokens.push(LexToken::new(token, self.text()));
            token = self.raw_next()?;
        }
        Ok((args, tokens))
    }

    fn invoke(&mut self, name: &str) -> Result<(), Error> {
        let Some(m) = self.macros.get(name).cloned() else {
            return Ok(());
        };
        let tokens = match &m.args {
            None => m.tokens,
            Some(formals) => {
                let actuals = self.arguments_for(&m.name, formals)?;
                substitute(&m.tokens, formals, &actuals)
            }
        };
        debug!(name, depth = self.frames.len(), "expand macro");
        let replay = Replay::new(self.file_name().to_string(), self.line(), tokens);
        self.push(Frame::Replay(replay))
    }

    /// Actual arguments of a function-like macro call. Commas inside nested
    /// parentheses do not separate arguments.
    fn arguments_for(&mut self, name: &str, formals: &[String]) -> Result<Vec<Vec<LexToken>>, Error> {
        if self.raw_next()? != Token::Char('(') {
            return Err(Error::MissingArguments(name.to_string()));
        }
        let mut actuals: Vec<Vec<LexToken>> = vec![];
        let mut current = vec![];
        let mut depth = 0usize;
        loop {
            let token = self.raw_next()?;
            match token {
                Token::Eof | Token::NEWLINE => {
                    return Err(Error::UnterminatedArguments(name.to_string()));
                }
                Token::Char(')') if depth == 0 => {
                    if !(formals.is_empty() && actuals.is_empty() && current.is_empty()) {
                        actuals.push(current);
                    }
                    break;
                }
                Token::Char(',') if depth == 0 => {
                    actuals.push(std::mem::take(&mut current));
                    if actuals.len() >= formals.len() {
                        return Err(Error::TooManyArguments(name.to_string()));
                    }
                }
                _ => {
                    match token {
                        Token::Char('(') => depth += 1,
                        Token::Char(')') => depth -= 1,
                        _ => {}
                    }
                    current.push(LexToken::new(token, self.text()));
                }
            }
        }
        if actuals.len() > formals.len() {
            return Err(Error::TooManyArguments(name.to_string()));
        }
        if actuals.len() < formals.len() {
            return Err(Error::TooFewArguments(name.to_string()));
        }
        Ok(actuals)
    }

    fn ifdef(&mut self, truth: bool) -> Result<(), Error> {
        let name = self.macro_name()?;
        self.expect_newline(if truth { "#ifdef" } else { "#ifndef" })?;
        let value = self.is_defined(&name) == truth;
        self.conds.push(value);
        Ok(())
    }

    fn else_(&mut self) -> Result<(), Error> {
        self.expect_newline("#else")?;
        let n = self.conds.len();
        if n == 0 {
            return Err(Error::UnmatchedElse);
        }
        let parent = n < 2 || self.conds[n - 2];
        self.conds[n - 1] = parent && !self.conds[n - 1];
        Ok(())
    }

    fn endif(&mut self) -> Result<(), Error> {
        self.expect_newline("#endif")?;
        self.conds.pop().map(|_| ()).ok_or(Error::UnmatchedEndif)
    }

    fn include(&mut self) -> Result<(), Error> {
        if self.raw_next()? != Token::String {
            return Err(self.expected("expected string after #include"));
        }
        let name = unquote(self.text()).map_err(|e| Error::Directive(e.to_string()))?;
        self.expect_newline("#include")?;

        let name = name
            .replace("_GOOS", &format!("_{}", self.goos))
            .replace("_GOARCH", &format!("_{}", self.goarch));

        let mut last = None;
        for path in self.include_candidates(&name) {
            match Tokenizer::open(&path) {
                Ok(tokenizer) => {
                    debug!(path = %path.display(), "#include");
                    return self.push(Frame::File(tokenizer));
                }
                Err(e) => last = Some(e),
            }
        }
        let err = last.unwrap_or_else(|| std::io::ErrorKind::NotFound.into());
        Err(Error::Include(name, err))
    }

    fn include_candidates(&self, name: &str) -> Vec<PathBuf> {
        let path = Path::new(name);
        if path.is_absolute() {
            return vec![path.to_path_buf()];
        }
        let current = Path::new(self.file_name())
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut dirs = vec![current, self.primary_dir.clone()];
        dirs.extend(self.include_dirs.iter().cloned());

        let mut candidates: Vec<PathBuf> = vec![];
        for dir in dirs {
            let candidate = dir.join(path);
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        if !candidates.iter().any(|c| c == path) {
            candidates.push(path.to_path_buf());
        }
        candidates
    }

    /// `#line N "file"`: the line after the directive is line N of `file`.
    fn line_directive(&mut self) -> Result<(), Error> {
        if self.raw_next()? != Token::Int {
            return Err(self.expected("expected line number after #line"));
        }
        let line: usize = self
            .text()
            .parse()
            .map_err(|_| self.expected("error parsing #line"))?;
        if self.raw_next()? != Token::String {
            return Err(self.expected("expected file name in #line"));
        }
        let file = unquote(self.text()).map_err(|e| Error::Directive(e.to_string()))?;
        self.expect_newline("#line")?;
        debug!(line, %file, "#line");
        if let Some(top) = self.frames.last_mut() {
            top.set_pos(line, &file);
        }
        Ok(())
    }

    fn undef(&mut self) -> Result<(), Error> {
        let name = self.macro_name()?;
        if self.macros.shift_remove(&name).is_none() {
            return Err(Error::UndefinedMacro(name));
        }
        debug!(%name, "#undef");
        match self.raw_next()? {
            Token::NEWLINE | Token::Eof => Ok(()),
            _ => Err(Error::Directive(format!("syntax error in #undef for macro: {name}"))),
        }
    }
}

/// Replaces every identifier naming a formal with that formal's actual
/// tokens. Nothing else in the body is touched.
fn substitute(body: &[LexToken], formals: &[String], actuals: &[Vec<LexToken>]) -> Vec<LexToken> {
    let mut out = vec![];
    for token in body {
        let actual = (token.token == Token::Ident)
            .then(|| formals.iter().position(|f| *f == token.text))
            .flatten()
            .and_then(|i| actuals.get(i));
        match actual {
            Some(actual) => out.extend(actual.iter().cloned()),
            None => out.push(token.clone()),
        }
    }
    out
}
