use std::{
    fs,
    io::{self, Write},
    path::Path,
};

/// Write `contents` to `path` such that concurrent readers see either the
/// previous contents or the new contents, never a truncated file.
///
/// The contents go to a hidden temporary file in the target's directory which
/// is then renamed into place; rename within one filesystem is atomic. The
/// temporary name carries the writer's pid, since unrelated processes share
/// the spool directory. On any failure the target is left untouched and the
/// temporary file is removed best-effort.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "target path has no file name"))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp_path = dir.join(format!(".{}.{}.tmp", file_name.to_string_lossy(), std::process::id()));

    let result = write_and_rename(&tmp_path, path, contents.as_ref());
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_and_rename(tmp_path: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(contents)?;
    file.flush()?;
    fs::rename(tmp_path, path)
}
