//! Commands implemented inside the shell process.

use crate::command::ExitCode;
use crate::env::Environment;
use crate::external::find_in_path;
use crate::redirect::{self, Redirects};
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Names that always resolve to a builtin, whatever the search path holds.
pub const BUILTINS: [&str; 5] = ["echo", "exit", "type", "pwd", "cd"];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Write the arguments separated by single spaces, followed by a newline.
///
/// With a stdout target the line goes to that file instead of `stdout`. A stderr
/// target is ignored and never opened.
pub fn echo(args: &[String], redirects: &Redirects, stdout: &mut dyn Write) -> Result<ExitCode> {
    let line = args.join(" ");
    let target = redirect::open_optional(redirects.stdout.as_deref())?;

    match target {
        Some(mut file) => writeln!(file, "{}", line)?,
        None => writeln!(stdout, "{}", line)?,
    }
    Ok(0)
}

/// Report how `name` would be interpreted as a command.
///
/// A program found on the search path is reported by its full path alone.
pub fn type_of(name: &str, env: &Environment, stdout: &mut dyn Write) -> Result<ExitCode> {
    if is_builtin(name) {
        writeln!(stdout, "{} is a shell builtin", name)?;
    } else if let Some(path) = find_in_path(env, name) {
        writeln!(stdout, "{}", path.display())?;
    } else {
        writeln!(stdout, "{}: not found", name)?;
    }
    Ok(0)
}

/// Print the current working directory.
pub fn pwd(env: &Environment, stdout: &mut dyn Write) -> Result<ExitCode> {
    writeln!(stdout, "{}", env.current_dir.display())?;
    Ok(0)
}

/// Change the working directory of the shell.
///
/// An empty `path` or `~` means the home directory. A directory that cannot be
/// entered is reported on `stdout` and is not an error.
pub fn cd(path: &str, env: &mut Environment, stdout: &mut dyn Write) -> Result<ExitCode> {
    let target = if path.is_empty() || path == "~" {
        env.home_dir()
            .ok_or_else(|| anyhow!("cd: unable to get home directory"))?
    } else {
        env.current_dir.join(path)
    };

    match enter(target) {
        Ok(dir) => {
            log::debug!("cd: now in {}", dir.display());
            env.current_dir = dir;
        }
        Err(e) => {
            log::debug!("cd: {:#}", e);
            writeln!(stdout, "cd: {}: No such file or directory", path)?;
        }
    }
    Ok(0)
}

fn enter(target: PathBuf) -> Result<PathBuf> {
    let canonical = fs::canonicalize(&target)
        .with_context(|| format!("can't canonicalize {}", target.display()))?;
    std::env::set_current_dir(&canonical)
        .with_context(|| format!("can't chdir to {}", canonical.display()))?;
    Ok(canonical)
}

/// Ask the shell to terminate with `code`.
///
/// The read loop checks [`Environment::exit_status`] after every command, so
/// nothing else runs once this returns.
pub fn exit(code: ExitCode, env: &mut Environment) -> Result<ExitCode> {
    env.exit_status = Some(code);
    Ok(code)
}
