#![cfg(unix)]

use minish::{Command, Environment, ExitCode, Interpreter, ResolveError, extract, resolve, tokenize};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

struct Sandbox {
    bin: TempDir,
    work: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            bin: tempfile::tempdir().expect("bin dir"),
            work: tempfile::tempdir().expect("work dir"),
        }
    }

    fn script(&self, name: &str, body: &str) {
        let path = self.bin.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
    }

    fn interpreter(&self) -> Interpreter {
        let path = format!("{}:/bin:/usr/bin", self.bin.path().display());
        Interpreter::new(Environment::with_vars(self.work.path(), [("PATH", path)]))
    }

    fn file(&self, name: &str) -> String {
        self.work.path().join(name).to_string_lossy().into_owned()
    }
}

fn eval(sh: &mut Interpreter, line: &str) -> (ExitCode, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = sh.eval_line(line, &mut out, &mut err);
    (code, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).expect("read output file")
}

#[test]
fn quoted_arguments_reach_external_program() {
    let sandbox = Sandbox::new();
    sandbox.script("args", "for a in \"$@\"; do printf '[%s]' \"$a\"; done; echo");
    let out = sandbox.file("out.txt");
    let mut sh = sandbox.interpreter();

    let line = format!(r#"args 'a  b' "c\"d" e\ f > {}"#, out);
    let (code, stdout, stderr) = eval(&mut sh, &line);

    assert_eq!(code, 0);
    assert_eq!(stdout, "");
    assert_eq!(stderr, "");
    assert_eq!(read(&out), "[a  b][c\"d][e f]\n");
}

#[test]
fn external_stderr_redirect() {
    let sandbox = Sandbox::new();
    sandbox.script("complain", "echo \"$1: missing\" >&2; exit 2");
    let err_file = sandbox.file("err.txt");
    let mut sh = sandbox.interpreter();

    let (code, stdout, stderr) = eval(&mut sh, &format!("complain thing 2> {}", err_file));

    assert_eq!(code, 2);
    assert_eq!(stdout, "");
    // The program reported its own failure; the shell adds nothing.
    assert_eq!(stderr, "");
    assert_eq!(read(&err_file), "thing: missing\n");
}

#[test]
fn external_redirect_failure_is_not_reported_by_the_shell() {
    let sandbox = Sandbox::new();
    sandbox.script("quiet", "exit 0");
    let mut sh = sandbox.interpreter();

    let (code, _, stderr) = eval(&mut sh, "quiet > /nonexistent-dir-for-minish/out");

    assert_eq!(code, 1);
    assert_eq!(stderr, "");
}

#[test]
fn program_without_executable_format_fails_quietly() {
    let sandbox = Sandbox::new();
    let path = sandbox.bin.path().join("garbage");
    fs::write(&path, "this is not a program\n").expect("write file");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
    let mut sh = sandbox.interpreter();

    let (code, stdout, stderr) = eval(&mut sh, "garbage");

    assert_eq!(code, 1);
    assert_eq!(stdout, "");
    assert_eq!(stderr, "");
}

#[test]
fn external_runs_in_shell_working_directory() {
    let sandbox = Sandbox::new();
    sandbox.script("where", "pwd");
    let out = sandbox.file("where.txt");
    let mut sh = sandbox.interpreter();

    let (code, _, _) = eval(&mut sh, &format!("where 1> {}", out));

    assert_eq!(code, 0);
    let expected = fs::canonicalize(sandbox.work.path()).unwrap();
    assert_eq!(fs::canonicalize(read(&out).trim()).unwrap(), expected);
}

#[test]
fn echo_redirect_round_trip() {
    let sandbox = Sandbox::new();
    let out = sandbox.file("hello.txt");
    let mut sh = sandbox.interpreter();

    let (code, stdout, _) = eval(&mut sh, &format!("echo 'Hello   James' > {}", out));
    assert_eq!(code, 0);
    assert_eq!(stdout, "");
    assert_eq!(read(&out), "Hello   James\n");

    // A second run truncates rather than appends.
    eval(&mut sh, &format!("echo again 1> {}", out));
    assert_eq!(read(&out), "again\n");
}

#[test]
fn echo_ignores_stderr_redirect() {
    let sandbox = Sandbox::new();
    let mut sh = sandbox.interpreter();

    let (code, stdout, stderr) = eval(&mut sh, "echo hi 2> /nonexistent-dir-for-minish/e");

    assert_eq!((code, stdout.as_str(), stderr.as_str()), (0, "hi\n", ""));
}

#[test]
fn type_prefers_builtins_over_path() {
    let sandbox = Sandbox::new();
    sandbox.script("cd", "exit 0");
    sandbox.script("mytool", "exit 0");
    let mut sh = sandbox.interpreter();

    assert_eq!(eval(&mut sh, "type cd").1, "cd is a shell builtin\n");
    assert_eq!(
        eval(&mut sh, "type mytool").1,
        format!("{}\n", sandbox.bin.path().join("mytool").display())
    );
}

#[test]
fn resolution_contract() {
    let env = Environment::new("/");
    let line = tokenize("cat f > out.txt");
    let (cleaned, redirects) = extract(&line);
    assert_eq!(cleaned, vec!["cat", "f"]);
    assert_eq!(redirects.stdout.as_deref(), Some("out.txt"));
    assert_eq!(redirects.stderr, None);

    assert_eq!(
        resolve(&env, "cat", &line[1..]),
        Err(ResolveError::CommandNotFound("cat".to_string()))
    );
    assert_eq!(resolve(&env, "pwd", &[]), Ok(Command::Pwd));
}
