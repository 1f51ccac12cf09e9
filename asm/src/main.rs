use arch::Target;
use color_print::ceprintln;
use p9asm::listing::Listing;
use p9asm::{assemble, Config, Program, Symbols};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    input: PathBuf,

    /// Write the assembled records as YAML
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Predefine a macro: `name` or `name=value`
    #[clap(short = 'D', value_name = "NAME[=VALUE]")]
    define: Vec<String>,

    /// Directory searched by #include
    #[clap(short = 'I', value_name = "DIR")]
    include: Vec<PathBuf>,

    /// Target architecture: 386 or amd64
    #[clap(long, env = "GOARCH", default_value = "amd64")]
    arch: String,

    /// Operating system substituted for _GOOS in #include names
    #[clap(long, env = "GOOS", default_value = std::env::consts::OS)]
    goos: String,

    /// Print the assembled records
    #[clap(short = 'S')]
    print: bool,

    /// Errors tolerated before giving up
    #[clap(long, default_value_t = 10)]
    max_errors: usize,

    /// Maximum nesting of includes and macro expansions
    #[clap(long, default_value_t = p9asm::input::MAX_DEPTH)]
    max_depth: usize,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[clap(short, long, default_value_t = Level::INFO)]
    log_level: Level,
}

#[derive(Serialize)]
struct Object<'a> {
    arch: Target,
    symbols: Vec<&'a str>,
    program: &'a Program,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    let arch = match arch::select(&args.arch) {
        Ok(arch) => arch,
        Err(e) => {
            ceprintln!("<red,bold>fatal</>: {}", p9asm::Error::from(e));
            return ExitCode::FAILURE;
        }
    };

    let config = Config {
        input: args.input,
        target: arch.target(),
        defines: args.define,
        includes: args.include,
        goos: args.goos,
        max_errors: args.max_errors,
        max_depth: args.max_depth,
    };

    let mut symbols = Symbols::new();
    let program = match assemble(&config, &mut symbols) {
        Ok(program) => program,
        Err(failure) => {
            failure.print_diag();
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(records = program.len(), symbols = symbols.len(), "assembled");

    if args.print {
        Listing::new(arch, &program, &symbols).print();
    }

    if let Some(path) = &args.output {
        let object = Object {
            arch: arch.target(),
            symbols: symbols.names().collect(),
            program: &program,
        };
        let written = serde_yaml::to_string(&object)
            .map_err(|e| e.to_string())
            .and_then(|yaml| std::fs::write(path, yaml).map_err(|e| e.to_string()));
        if let Err(e) = written {
            ceprintln!("<red,bold>fatal</>: failed to write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        tracing::info!(output = %path.display(), "written");
    }

    ExitCode::SUCCESS
}
