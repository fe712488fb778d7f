//! Resolution of a command name and its arguments into a [`Command`].

use crate::command::{Command, ExitCode};
use crate::env::Environment;
use crate::external::find_in_path;
use crate::lexer::tokenize;
use crate::redirect::extract;
use thiserror::Error;

/// Errors that prevent a line from becoming a runnable command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A builtin that needs at least one argument got none.
    #[error("{command}: missing arguments")]
    MissingArguments { command: String },
    /// The name is not a builtin and no executable on the search path matches it.
    #[error("{0}: command not found")]
    CommandNotFound(String),
}

/// Build the command for `name` invoked with `raw_args`.
///
/// Redirections are stripped from `raw_args` first. Builtin names are matched
/// exactly and always take precedence over programs on the search path.
pub fn resolve(env: &Environment, name: &str, raw_args: &[String]) -> Result<Command, ResolveError> {
    let (args, redirects) = extract(raw_args);

    let command = match name {
        "exit" => Command::Exit {
            code: args.first().map_or(0, |arg| parse_status(arg)),
        },
        "echo" => {
            if args.is_empty() {
                return Err(missing_arguments(name));
            }
            Command::Echo { args, redirects }
        }
        "type" => match args.into_iter().next() {
            Some(name) => Command::Type { name },
            None => return Err(missing_arguments(name)),
        },
        "pwd" => Command::Pwd,
        // cd takes its operand before redirections are stripped.
        "cd" => Command::Cd {
            path: raw_args.first().cloned().unwrap_or_default(),
        },
        _ => match find_in_path(env, name) {
            Some(path) => Command::External {
                path,
                args,
                redirects,
            },
            None => return Err(ResolveError::CommandNotFound(name.to_string())),
        },
    };

    log::debug!("resolved {}: {:?}", name, command);
    Ok(command)
}

/// Tokenize `line` and resolve it. Returns `Ok(None)` for a line without tokens.
pub fn parse_line(env: &Environment, line: &str) -> Result<Option<Command>, ResolveError> {
    let tokens = tokenize(line);
    match tokens.split_first() {
        Some((name, args)) => resolve(env, name, args).map(Some),
        None => Ok(None),
    }
}

fn missing_arguments(command: &str) -> ResolveError {
    ResolveError::MissingArguments {
        command: command.to_string(),
    }
}

/// Status for `exit`. Anything that is not a 64-bit integer means 0; larger
/// values keep their low 32 bits.
fn parse_status(arg: &str) -> ExitCode {
    arg.parse::<i64>().map_or(0, |code| code as ExitCode)
}
