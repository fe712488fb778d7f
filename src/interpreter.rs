use crate::command::ExitCode;
use crate::env::Environment;
use crate::parser::parse_line;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Write};

const PROMPT: &str = "$ ";

/// A minimal interactive shell: parses lines and runs builtins or external programs.
///
/// The interpreter owns the [`Environment`] every command runs in, so state changed
/// by one line (`cd`, `exit`) is visible to the next.
///
/// Example
/// ```
/// use minish::{Environment, Interpreter};
/// let mut sh = Interpreter::new(Environment::new("/"));
/// let mut out = Vec::new();
/// let code = sh.eval_line("echo 'hello   world'", &mut out, &mut std::io::sink());
/// assert_eq!(code, 0);
/// assert_eq!(out, b"hello   world\n");
/// ```
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Status requested by `exit`, once it has run.
    pub fn exit_status(&self) -> Option<ExitCode> {
        self.env.exit_status
    }

    /// Parse and run one input line.
    ///
    /// Builtin output goes to `stdout`; parse errors and builtin failures are reported
    /// on `stderr`. Failures of external programs are left to the program itself.
    /// Returns the exit status of the line (1 when it could not be parsed or run).
    pub fn eval_line(&mut self, line: &str, stdout: &mut dyn Write, stderr: &mut dyn Write) -> ExitCode {
        let command = match parse_line(&self.env, line.trim()) {
            Ok(Some(command)) => command,
            Ok(None) => return 0,
            Err(e) => {
                let _ = writeln!(stderr, "{}", e);
                return 1;
            }
        };

        let is_external = command.is_external();
        match command.run(&mut self.env, stdout) {
            Ok(code) => code,
            Err(e) if is_external => {
                log::warn!("{:#}", e);
                1
            }
            Err(e) => {
                let _ = writeln!(stderr, "Error executing command: {:#}", e);
                1
            }
        }
    }

    /// Read-Eval-Print Loop on the terminal.
    ///
    /// Returns the status to exit the process with: the one given to `exit`, or 0
    /// when input ends.
    pub fn repl(&mut self) -> rustyline::Result<ExitCode> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line)?;

                    let code = self.eval_line(line, &mut io::stdout(), &mut io::stderr());
                    log::debug!("status {}", code);
                    io::stdout().flush()?;
                    if let Some(status) = self.exit_status() {
                        return Ok(status);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(0),
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for Interpreter {
    /// An interpreter running in a snapshot of the current process environment.
    fn default() -> Self {
        Self::new(Environment::from_process())
    }
}
