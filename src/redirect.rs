//! Output redirection: splitting `>`, `1>` and `2>` operators out of an
//! argument list, and opening the target files when a command runs.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

/// Stream a redirection operator applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `>` or `1>`.
    Stdout,
    /// `2>`.
    Stderr,
}

impl RedirectKind {
    /// Classify a token as a redirection operator.
    pub fn from_operator(token: &str) -> Option<Self> {
        match token {
            ">" | "1>" => Some(RedirectKind::Stdout),
            "2>" => Some(RedirectKind::Stderr),
            _ => None,
        }
    }
}

/// Redirection targets of one command. `None` means the shell's own stream is inherited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirects {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl Redirects {
    pub fn is_empty(&self) -> bool {
        self.stdout.is_none() && self.stderr.is_none()
    }

    fn set(&mut self, kind: RedirectKind, target: String) {
        match kind {
            RedirectKind::Stdout => self.stdout = Some(target),
            RedirectKind::Stderr => self.stderr = Some(target),
        }
    }
}

/// Remove redirection operators and their filenames from `tokens`.
///
/// Returns the remaining arguments in their original order together with the
/// collected targets. A later operator for the same stream overrides an earlier one.
/// An operator in the last position has no filename; it is dropped and sets nothing.
pub fn extract(tokens: &[String]) -> (Vec<String>, Redirects) {
    let mut cleaned = Vec::with_capacity(tokens.len());
    let mut redirects = Redirects::default();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        match RedirectKind::from_operator(token) {
            Some(kind) => {
                if let Some(target) = tokens.get(i + 1) {
                    redirects.set(kind, target.clone());
                } else {
                    log::debug!("dropping trailing '{}' with no filename", token);
                }
                i += 2;
            }
            None => {
                cleaned.push(token.clone());
                i += 1;
            }
        }
    }

    if !redirects.is_empty() {
        log::debug!("redirections: {:?}", redirects);
    }
    (cleaned, redirects)
}

/// Create (or truncate) a redirection target.
///
/// The returned handle is closed when dropped, so callers keep it scoped to a single run.
pub fn open_target(path: &str) -> Result<File> {
    File::create(Path::new(path))
        .with_context(|| format!("error opening redirection file: {}", path))
}

/// Open an optional target, passing `None` through.
pub fn open_optional(path: Option<&str>) -> Result<Option<File>> {
    path.map(open_target).transpose()
}
