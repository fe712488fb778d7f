//! A tiny interactive shell.
//!
//! A line goes through three stages before anything runs:
//!
//! 1. [`tokenize`] splits it into words, honoring single quotes, double quotes
//!    and backslash escapes.
//! 2. [`extract`] removes the `>`, `1>` and `2>` redirections and their filenames.
//! 3. [`resolve`] turns the command name and remaining words into a [`Command`]:
//!    one of the builtins (`exit`, `echo`, `type`, `pwd`, `cd`) or an external
//!    program found on `PATH`.
//!
//! [`Command::run`] then performs it against an [`Environment`], the explicit
//! execution context holding variables, the working directory and the exit request.
//! [`Interpreter`] ties the stages together and provides the prompt loop.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
mod lexer;
mod parser;
pub mod redirect;

pub use command::{Command, ExitCode};
pub use env::Environment;
pub use external::find_in_path;
pub use interpreter::Interpreter;
pub use lexer::tokenize;
pub use parser::{ResolveError, parse_line, resolve};
pub use redirect::{Redirects, extract};
