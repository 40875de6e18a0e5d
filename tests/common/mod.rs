#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that write and then execute scripts, so no sibling test
/// forks while a script is still open for writing.
pub fn serial() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Writes an executable `sh` script standing in for an external tool.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Shell snippet that stores the value following `flag` in `$out`.
pub fn capture_flag(flag: &str) -> String {
    format!(
        "out=\"\"\nwhile [ $# -gt 0 ]; do\n  if [ \"$1\" = \"{}\" ]; then out=\"$2\"; fi\n  shift\ndone",
        flag
    )
}
