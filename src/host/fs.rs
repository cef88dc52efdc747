//! Filesystem primitives standing in for a scripting host's `fs` object:
//! exists/is_file/is_dir/make_dir/list/open/working_directory. A reference
//! implementation of this surface reads files into a fixed-size buffer and
//! null-terminates at `len - 1`, silently truncating long files; that bug
//! is not reproduced here since `std::fs::read_to_string` has no such limit.

use std::io;
use std::path::{Path, PathBuf};

pub fn exists(path: &Path) -> bool {
    path.exists()
}

pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

pub fn make_dir(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}

pub fn list(path: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(path)? {
        entries.push(entry?.path());
    }
    Ok(entries)
}

pub fn open(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

pub fn working_directory() -> io::Result<PathBuf> {
    std::env::current_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn reads_back_a_written_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("source.js");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "var x = 1;").unwrap();
        drop(file);

        assert!(exists(&path));
        assert!(is_file(&path));
        assert_eq!(open(&path).unwrap(), "var x = 1;");
    }

    #[test]
    fn lists_directory_entries() {
        let dir = tempdir().unwrap();
        std::fs::File::create(dir.path().join("a.js")).unwrap();
        std::fs::File::create(dir.path().join("b.js")).unwrap();

        let entries = list(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn make_dir_creates_nested_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        make_dir(&nested).unwrap();
        assert!(is_dir(&nested));
    }
}
