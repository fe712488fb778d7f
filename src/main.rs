use argh::FromArgs;
use minish::{ExitCode, Interpreter};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::io::{self, Write};

#[derive(FromArgs)]
/// A tiny interactive shell with builtins, quoting and output redirection.
struct Args {
    #[argh(option, short = 'c')]
    /// run a single command line and exit with its status.
    command: Option<String>,

    #[argh(switch, short = 'v')]
    /// more log output; repeat for more detail.
    verbose: u8,

    #[argh(option)]
    /// write logs to this file instead of standard error.
    log_file: Option<String>,
}

fn init_logging(args: &Args) {
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let result = match &args.log_file {
        Some(path) => match File::create(path) {
            Ok(file) => WriteLogger::init(level, Config::default(), file),
            Err(e) => {
                eprintln!("minish: can't open log file {}: {}", path, e);
                return;
            }
        },
        None => TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto),
    };
    if let Err(e) = result {
        eprintln!("minish: logging disabled: {}", e);
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let mut sh = Interpreter::default();
    match &args.command {
        Some(line) => {
            let code = sh.eval_line(line, &mut io::stdout(), &mut io::stderr());
            Ok(sh.exit_status().unwrap_or(code))
        }
        None => Ok(sh.repl()?),
    }
}

fn main() {
    let args: Args = argh::from_env();
    init_logging(&args);

    let code = match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("minish: {:#}", e);
            1
        }
    };
    let _ = io::stdout().flush();
    std::process::exit(code);
}
