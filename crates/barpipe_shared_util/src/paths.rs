use std::{
    fs, io,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

/// Stores references to all the paths relevant to barpipe, and abstracts
/// access to these files and directories.
///
/// Layout under the base directory:
/// - `spool/` — the shared directory producers publish into
///   (`<service>.pid` / `<service>.block`)
/// - `barpipe.pid` — the aggregator's own pid, target of the wake signal
#[derive(Debug, Clone)]
pub struct BarpipePaths {
    base_dir: PathBuf,
    spool_dir: PathBuf,
    daemon_pid_file: PathBuf,
}

impl BarpipePaths {
    pub fn from_base_dir<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        BarpipePaths {
            spool_dir: base_dir.join("spool"),
            daemon_pid_file: base_dir.join("barpipe.pid"),
            base_dir,
        }
    }

    pub fn default() -> Self {
        let base_dir = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("barpipe"))
            .unwrap_or_else(|_| std::env::temp_dir().join(format!("barpipe-{}", nix::unistd::Uid::current())));
        Self::from_base_dir(base_dir)
    }

    /// Create the runtime directories, restricted to the owning user.
    pub fn create(&self) -> io::Result<()> {
        for dir in [&self.base_dir, &self.spool_dir] {
            fs::create_dir_all(dir)?;
            fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        self.base_dir.as_path()
    }

    pub fn spool_dir(&self) -> &Path {
        self.spool_dir.as_path()
    }

    pub fn daemon_pid_file(&self) -> &Path {
        self.daemon_pid_file.as_path()
    }

    pub fn pid_file_for(&self, service: &crate::ServiceId) -> PathBuf {
        self.spool_dir.join(format!("{}.pid", service))
    }

    pub fn block_file_for(&self, service: &crate::ServiceId) -> PathBuf {
        self.spool_dir.join(format!("{}.block", service))
    }
}

impl std::fmt::Display for BarpipePaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "base-dir: {}, spool-dir: {}", self.base_dir.display(), self.spool_dir.display())
    }
}

#[cfg(test)]
mod test {
    use super::BarpipePaths;
    use crate::ServiceId;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn layout_hangs_off_the_base_dir() {
        let paths = BarpipePaths::from_base_dir("/run/user/1000/barpipe");
        assert_eq!(paths.spool_dir().to_str().unwrap(), "/run/user/1000/barpipe/spool");
        assert_eq!(paths.daemon_pid_file().to_str().unwrap(), "/run/user/1000/barpipe/barpipe.pid");
        let clock = ServiceId::from("30clock");
        assert_eq!(paths.pid_file_for(&clock).to_str().unwrap(), "/run/user/1000/barpipe/spool/30clock.pid");
        assert_eq!(paths.block_file_for(&clock).to_str().unwrap(), "/run/user/1000/barpipe/spool/30clock.block");
    }

    #[test]
    fn create_restricts_directories_to_the_owner() {
        let dir = tempfile::tempdir().unwrap();
        let paths = BarpipePaths::from_base_dir(dir.path().join("barpipe"));
        paths.create().unwrap();

        for dir in [paths.base_dir(), paths.spool_dir()] {
            let mode = std::fs::metadata(dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }
}
