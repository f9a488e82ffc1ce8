use std::{collections::BTreeMap, ffi::OsStr, fs, path::Path};

use anyhow::{Context, Result};
use barpipe_shared_util::{wake::read_pid_file, ServiceId};
use nix::{sys::signal, unistd::Pid};

/// Check whether `pid` names a running process, via the zero-signal probe.
///
/// Anything other than a clean probe counts as dead, EPERM included: the bar
/// must not keep showing a producer whose liveness cannot be confirmed.
pub fn pid_is_live(pid: Pid) -> bool {
    signal::kill(pid, None).is_ok()
}

/// Scan the spool for liveness records, returning the live services in
/// ascending service-id order.
///
/// Malformed or unreadable records are skipped silently; a producer may be
/// mid-way through its own startup write. The only reported error is failing
/// to read the spool directory itself.
pub fn scan(spool_dir: &Path) -> Result<BTreeMap<ServiceId, Pid>> {
    let entries = fs::read_dir(spool_dir)
        .with_context(|| format!("Failed to read spool directory {}", spool_dir.display()))?;

    let mut live = BTreeMap::new();
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.extension() != Some(OsStr::new("pid")) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(OsStr::to_str) else { continue };
        let Some(pid) = read_pid_file(&path) else { continue };
        if pid_is_live(pid) {
            live.insert(ServiceId::from(stem), pid);
        } else {
            log::debug!("service {} (pid {}) is stale", stem, pid);
        }
    }
    Ok(live)
}
