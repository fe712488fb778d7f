use crate::command::ExitCode;
use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// Execution context owned by the interpreter.
///
/// The environment contains:
/// - `vars`: a snapshot of environment variables; `PATH` and `HOME` are looked up here.
/// - `current_dir`: the working directory for command execution.
/// - `exit_status`: set by the `exit` builtin; the read loop terminates with it.
///
/// Commands never read `std::env` directly, so tests can hand them a fake context.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, HOME).
    pub vars: HashMap<String, String>,
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// Status requested by `exit`, if any.
    pub exit_status: Option<ExitCode>,
}

impl Environment {
    /// An empty context rooted at `current_dir`. No variables are set, so
    /// the search path is empty and `HOME` is unknown.
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            current_dir: current_dir.into(),
            exit_status: None,
        }
    }

    /// Like [`Environment::new`] but pre-populated with `vars`.
    pub fn with_vars<K, V>(current_dir: impl Into<PathBuf>, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut env = Self::new(current_dir);
        for (k, v) in vars {
            env.set_var(k, v);
        }
        env
    }

    /// Capture the current process state.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let vars = stdenv::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::with_vars(current_dir, vars)
    }

    /// Get the value of an environment variable.
    pub fn get_var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Set or override an environment variable.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Directories of the search path, in order. Empty when `PATH` is unset.
    pub fn search_path(&self) -> Vec<PathBuf> {
        match self.get_var("PATH") {
            Some(paths) => paths.split(':').map(PathBuf::from).collect(),
            None => Vec::new(),
        }
    }

    /// The user's home directory, taken from `HOME`.
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.get_var("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
    }

    pub fn should_exit(&self) -> bool {
        self.exit_status.is_some()
    }
}
