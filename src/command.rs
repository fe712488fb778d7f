use crate::builtin;
use crate::env::Environment;
use crate::external;
use crate::redirect::Redirects;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// One parsed command line, ready to run.
///
/// The set of commands is closed: every builtin has its own variant and anything
/// else is an [`Command::External`] program that was already found on the search path.
/// A value owns its arguments and is consumed by [`Command::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `exit [status]`
    Exit { code: ExitCode },
    /// `echo args...`
    Echo { args: Vec<String>, redirects: Redirects },
    /// `type name`
    Type { name: String },
    /// `pwd`
    Pwd,
    /// `cd [path]`; an empty path means the home directory.
    Cd { path: String },
    /// A program resolved to `path`.
    External {
        path: PathBuf,
        args: Vec<String>,
        redirects: Redirects,
    },
}

impl Command {
    /// Executes the command.
    ///
    /// Builtin output that is not redirected goes to `stdout`. External programs
    /// write to the real standard streams (or their redirection targets) directly.
    pub fn run(self, env: &mut Environment, stdout: &mut dyn Write) -> Result<ExitCode> {
        match self {
            Command::Exit { code } => builtin::exit(code, env),
            Command::Echo { args, redirects } => builtin::echo(&args, &redirects, stdout),
            Command::Type { name } => builtin::type_of(&name, env, stdout),
            Command::Pwd => builtin::pwd(env, stdout),
            Command::Cd { path } => builtin::cd(&path, env, stdout),
            Command::External {
                path,
                args,
                redirects,
            } => {
                // The child shares our stdout; flush what builtins wrote so far.
                stdout.flush()?;
                external::spawn(&path, &args, &redirects, env)
            }
        }
    }

    /// External programs report their own failures on their own stderr.
    pub fn is_external(&self) -> bool {
        matches!(self, Command::External { .. })
    }
}
