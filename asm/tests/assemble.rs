use arch::Target;
use p9asm::listing::Listing;
use p9asm::{assemble, Config, Error, Failure, Kind, Operand, Prog, Program, SymbolKind, Symbols};
use std::path::PathBuf;

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

fn run(config: &Config) -> (Result<Program, Failure>, Symbols) {
    let mut symbols = Symbols::new();
    let result = assemble(config, &mut symbols);
    match &result {
        Ok(program) => Listing::new(config.target.table(), program, &symbols).print(),
        Err(failure) => {
            for diag in failure.diags() {
                println!("{diag}");
            }
        }
    }
    (result, symbols)
}

fn assert(name: &str, target: Target, records: usize) -> (Vec<Prog>, Symbols) {
    let (result, symbols) = run(&Config::new(testdata(name), target));
    let program = match result {
        Ok(program) => program,
        Err(failure) => panic!("{name}: {failure}"),
    };
    assert_eq!(program.len(), records);
    (program.iter().map(|(_, p)| p.clone()).collect(), symbols)
}

macro_rules! case {
    ($name:ident, $file:expr, $target:expr, $records:expr) => {
        #[test]
        fn $name() {
            assert($file, $target, $records);
        }
    };
}

case!(copy_amd64, "copy_amd64.s", Target::Amd64, 12);
case!(cond_amd64, "cond_amd64.s", Target::Amd64, 3);
case!(labels_386, "labels_386.s", Target::I386, 11);

#[test]
fn include_and_macros() {
    let (progs, symbols) = assert("copy_amd64.s", Target::Amd64, 12);

    let text = &progs[0];
    assert_eq!(text.from.scale, 4);
    assert_eq!(text.to, Operand::constant(24 << 32));
    assert_eq!(symbols.name(text.from.sym.unwrap()), Some(".copy"));
    assert_eq!(symbols.kind(text.from.sym.unwrap()), Some(SymbolKind::Text));

    assert_eq!(progs[1].from.kind, Kind::Param);
    assert_eq!(progs[3].from.offset, 16);
    assert_eq!(progs[4].to, Operand::constant(3));
    assert_eq!(progs[5].to.kind, Kind::Branch);

    let data = &progs[10];
    assert_eq!((data.from.kind, data.from.scale), (Kind::Static, 8));
    assert_eq!(data.to, Operand::constant(0x0102030405060708));
    let globl = &progs[11];
    assert_eq!(globl.from.sym, data.from.sym);
    assert_eq!((globl.from.scale, globl.to.offset), (8, 8));
    assert_eq!((data.pc, globl.pc), (10, 10));
}

#[test]
fn forward_and_backward_labels() {
    let config = Config::new(testdata("labels_386.s"), Target::I386);
    let (result, _) = run(&config);
    let program = result.unwrap();
    let ids: Vec<_> = program.iter().map(|(id, _)| id).collect();
    let progs: Vec<_> = program.iter().map(|(_, p)| p).collect();
    // JCXZL done
    assert_eq!(progs[4].to.target(), Some(ids[9]));
    // JMP loop
    assert_eq!(progs[8].to.target(), Some(ids[4]));
    assert_eq!(progs[9].to.kind, Kind::Param);
    assert_eq!(progs[9].to.offset, 8);
}

#[test]
fn predefine_selects_branch() {
    let (progs, _) = assert("cond_amd64.s", Target::Amd64, 3);
    assert_eq!(progs[0].from.scale, 6);
    assert_eq!(progs[0].to, Operand::constant(8));

    let mut config = Config::new(testdata("cond_amd64.s"), Target::Amd64);
    config.defines.push("FAST".to_string());
    let (result, _) = run(&config);
    let progs: Vec<_> = result.unwrap().iter().map(|(_, p)| p.clone()).collect();
    assert_eq!(progs.len(), 3);
    assert_eq!(progs[0].from.scale, 4);
    assert_eq!(progs[0].to, Operand::constant(0));
}

#[test]
fn recoverable_errors_are_collected() {
    let (result, _) = run(&Config::new(testdata("errors.s"), Target::Amd64));
    let Err(Failure::Rejected(diags)) = result else {
        panic!("expected rejection");
    };
    let lines: Vec<_> = diags.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![2, 3, 5]);
    assert!(matches!(diags[0].error, Error::UnknownInstruction(_)));
    assert!(diags[0].file.ends_with("errors.s"));
}

#[test]
fn fatal_errors_stop_the_run() {
    let cases: [(&str, fn(&Error) -> bool); 3] = [
        ("duplicate.s", |e| matches!(e, Error::RedefinedLabel(_))),
        ("recursive.s", |e| matches!(e, Error::InputRecursion)),
        ("missing_include.s", |e| matches!(e, Error::Include(..))),
    ];
    for (name, check) in cases {
        let (result, _) = run(&Config::new(testdata(name), Target::Amd64));
        match result {
            Err(Failure::Aborted { fatal, earlier }) => {
                assert!(check(&fatal.error), "{name}: {fatal}");
                assert!(earlier.is_empty());
            }
            other => panic!("{name}: expected abort, got {other:?}"),
        }
    }
}

#[test]
fn recursion_limit_is_configurable() {
    let mut config = Config::new(testdata("recursive.s"), Target::Amd64);
    config.max_depth = 3;
    let (result, _) = run(&config);
    let fatal = result.unwrap_err();
    assert!(matches!(fatal.fatal().map(|d| &d.error), Some(Error::InputRecursion)));
}

#[test]
fn missing_input_file() {
    let (result, _) = run(&Config::new(testdata("nope.s"), Target::Amd64));
    let failure = result.unwrap_err();
    let fatal = failure.fatal().unwrap();
    assert_eq!(fatal.line, 0);
    assert!(matches!(fatal.error, Error::FileOpen(..)));
}

#[test]
fn error_in_included_file_names_that_file() {
    let (result, _) = run(&Config::new(testdata("include_error.s"), Target::Amd64));
    let Err(Failure::Rejected(diags)) = result else {
        panic!("expected rejection");
    };
    assert_eq!(diags.len(), 1);
    assert!(diags[0].file.ends_with("bad_literal.h"), "{}", diags[0]);
    assert_eq!(diags[0].line, 1);
    assert!(matches!(diags[0].error, Error::Lexical(_)));
}

#[test]
fn nested_ifdef_ifndef_by_predefine() {
    for (defines, records) in [(vec!["A"], 2), (vec!["A", "B"], 1), (vec!["B"], 1), (vec![], 1)] {
        let mut config = Config::new(testdata("nested_cond.s"), Target::Amd64);
        config.defines = defines.iter().map(|d| d.to_string()).collect();
        let (result, _) = run(&config);
        assert_eq!(result.unwrap().len(), records, "-D {defines:?}");
    }
}
