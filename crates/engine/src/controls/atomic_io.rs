use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Replaces `path` with `text` in one step: the bytes land in a sibling temp
/// file first and are renamed over the target, so the previous controls stay
/// on disk until the new ones are complete.
pub(crate) fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    let result = fs::write(&tmp_path, text.as_bytes()).and_then(|()| rename_over(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

#[cfg(not(windows))]
fn rename_over(tmp_path: &Path, final_path: &Path) -> io::Result<()> {
    fs::rename(tmp_path, final_path)
}

// Rename refuses to replace an existing file here.
#[cfg(windows)]
fn rename_over(tmp_path: &Path, final_path: &Path) -> io::Result<()> {
    match fs::remove_file(final_path) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    fs::rename(tmp_path, final_path)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("controls.ini");
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_existing_file_and_leaves_no_temp_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("player1controls.ini");
        fs::write(&path, "up=W\ndown=S\nleft=A\nright=D\nsprint=LeftShift\n").expect("seed");

        write_text_atomic(&path, "up=UpArrow\n").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "up=UpArrow\n");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn failed_write_keeps_previous_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("player1controls.ini");
        fs::write(&path, "sprint=LeftShift\n").expect("seed");
        fs::create_dir(temp_path_for(&path)).expect("block temp path");

        write_text_atomic(&path, "sprint=RightShift\n").expect_err("must fail");

        assert_eq!(fs::read_to_string(&path).expect("read"), "sprint=LeftShift\n");
    }

    #[cfg(unix)]
    #[test]
    fn failed_rename_keeps_previous_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("player1controls.ini");
        fs::create_dir(&path).expect("dir");
        fs::write(path.join("keep"), "sprint=LeftShift\n").expect("seed");

        write_text_atomic(&path, "sprint=RightShift\n").expect_err("must fail");

        assert!(path.join("keep").exists());
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config").join("controls.ini");

        write_text_atomic(&path, "sprint=RightShift\n").expect("write");

        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "sprint=RightShift\n"
        );
    }
}
