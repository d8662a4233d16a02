use std::ffi::OsStr;
use std::process::{Command, Output};

/// Captured result of one `rvmodel` invocation.
#[derive(Debug)]
pub struct Run {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the binary with `args` and no `RUST_LOG` override.
pub fn rvmodel<I, S>(args: I) -> Run
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let Output { status, stdout, stderr } = Command::new(env!("CARGO_BIN_EXE_rvmodel"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    Run {
        success: status.success(),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    }
}
