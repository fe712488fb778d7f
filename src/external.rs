use crate::command::ExitCode;
use crate::env::Environment;
use crate::redirect::{self, Redirects};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Find the first executable named `name` on the search path of `env`.
///
/// Each directory is probed independently; a candidate matches when it exists,
/// is not a directory and has at least one execute permission bit. Unreadable
/// or missing directories are skipped.
pub fn find_in_path(env: &Environment, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    for dir in env.search_path() {
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            log::trace!("{} resolved to {}", name, candidate.display());
            return Some(candidate);
        }
        log::trace!("{} not found in {}", name, dir.display());
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(metadata) => !metadata.is_dir() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|metadata| !metadata.is_dir())
}

/// Launch `path` with `args`, wait for it and return its exit status.
///
/// `argv[0]` is the base name of `path`. Standard input is inherited; standard
/// output and error go to the redirection targets when present.
pub fn spawn(
    path: &Path,
    args: &[String],
    redirects: &Redirects,
    env: &Environment,
) -> Result<ExitCode> {
    let stdout = redirect::open_optional(redirects.stdout.as_deref())?;
    let stderr = redirect::open_optional(redirects.stderr.as_deref())?;

    let mut cmd = std::process::Command::new(path);
    set_arg0(&mut cmd, path);
    cmd.args(args)
        .env_clear()
        .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .current_dir(&env.current_dir)
        .stdin(Stdio::inherit())
        .stdout(stdout.map_or_else(Stdio::inherit, Stdio::from))
        .stderr(stderr.map_or_else(Stdio::inherit, Stdio::from));

    log::debug!("spawning {} {:?}", path.display(), args);
    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to execute {}", path.display()))?;
    let exit_status = child.wait()?;
    log::debug!("{} exited with {}", path.display(), exit_status);

    match exit_status.code() {
        Some(x) => Ok(x),
        None => Ok(terminated_by_signal(exit_status)),
    }
}

#[cfg(unix)]
fn set_arg0(cmd: &mut std::process::Command, path: &Path) {
    use std::os::unix::process::CommandExt;
    if let Some(base) = path.file_name() {
        cmd.arg0(base);
    }
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut std::process::Command, _path: &Path) {}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}
