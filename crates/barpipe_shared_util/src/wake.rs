//! The wake channel between producers and the aggregator.
//!
//! A producer that wants the bar refreshed before the aggregator's next poll
//! tick sends `WAKE_SIGNAL` to the pid registered in the aggregator's pid
//! file. Delivery is coalescing and best-effort; a lost wake only delays the
//! refresh until the next periodic tick.

use std::path::Path;

use nix::{
    sys::signal::{self, Signal},
    unistd::Pid,
};

use crate::paths::BarpipePaths;

pub const WAKE_SIGNAL: Signal = Signal::SIGUSR1;

/// Read a pid file: the decimal process id as text, nothing else.
/// Returns `None` for missing, unreadable, or malformed files.
pub fn read_pid_file(path: &Path) -> Option<Pid> {
    let raw = std::fs::read_to_string(path).ok()?;
    let pid = raw.trim().parse::<i32>().ok()?;
    Some(Pid::from_raw(pid))
}

/// Ask a running aggregator to re-emit its output immediately.
///
/// All failure modes are swallowed: a missing or dead aggregator is not the
/// caller's problem, and the next periodic poll restores consistency anyway.
pub fn wake_aggregator(paths: &BarpipePaths) {
    let Some(pid) = read_pid_file(paths.daemon_pid_file()) else {
        log::debug!("no aggregator pid file at {}", paths.daemon_pid_file().display());
        return;
    };
    if let Err(err) = signal::kill(pid, WAKE_SIGNAL) {
        log::debug!("failed to wake aggregator (pid {}): {}", pid, err);
    }
}

#[cfg(test)]
mod test {
    use super::read_pid_file;
    use nix::unistd::Pid;

    #[test]
    fn parses_a_plain_decimal_pid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("barpipe.pid");
        std::fs::write(&path, "1234\n").unwrap();
        assert_eq!(read_pid_file(&path), Some(Pid::from_raw(1234)));
    }

    #[test]
    fn rejects_garbage_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("barpipe.pid");
        assert_eq!(read_pid_file(&path), None);

        std::fs::write(&path, "not a pid").unwrap();
        assert_eq!(read_pid_file(&path), None);
    }
}
