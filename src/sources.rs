//! Source units: files, directory children and standard input.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::Error;

/// Identifier used for the unit read from standard input.
pub const STDIN_NAME: &str = "<no filename>";

/// Suffix a directory child must carry to be summarized.
pub const GO_SUFFIX: &str = ".go";

/// One parse target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceUnit {
    Stdin,
    File(PathBuf),
}

impl SourceUnit {
    /// The label printed in headers, findings and error messages.
    pub fn identifier(&self) -> String {
        match self {
            SourceUnit::Stdin => STDIN_NAME.to_string(),
            SourceUnit::File(path) => path.display().to_string(),
        }
    }

    /// Read the whole unit. `stdin` is only touched for [`SourceUnit::Stdin`].
    pub fn read(&self, stdin: &mut dyn Read) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        let result = match self {
            SourceUnit::Stdin => stdin.read_to_end(&mut bytes),
            SourceUnit::File(path) => File::open(path).and_then(|mut f| f.read_to_end(&mut bytes)),
        };
        result.map_err(|source| Error::Read {
            name: self.identifier(),
            source,
        })?;
        Ok(bytes)
    }
}

/// What a command-line path turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

/// Stat a command-line path.
pub fn classify(path: &Path) -> Result<PathKind, Error> {
    let metadata = std::fs::metadata(path).map_err(|source| Error::Path {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(if metadata.is_dir() {
        PathKind::Directory
    } else {
        PathKind::File
    })
}

/// Go files directly inside `dir`, in file-name order.
///
/// Subdirectories are never entered. Entries the walker cannot read come back as
/// errors in their place so the caller can report them and carry on.
pub fn directory_units(dir: &Path) -> Vec<Result<SourceUnit, Error>> {
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut units = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    continue;
                }
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                let is_go = entry.file_name().to_string_lossy().ends_with(GO_SUFFIX);
                if is_dir || !is_go {
                    continue;
                }
                tracing::debug!(path = %entry.path().display(), "found source file");
                units.push(Ok(SourceUnit::File(entry.into_path())));
            }
            Err(err) => units.push(Err(Error::from_walk(dir.to_path_buf(), err))),
        }
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    #[test]
    fn test_directory_units_are_shallow_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.go"), "package b\n").unwrap();
        fs::write(dir.path().join("a.go"), "package a\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not go\n").unwrap();
        fs::write(dir.path().join(".hidden.go"), "package h\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.go"), "package c\n").unwrap();
        fs::create_dir(dir.path().join("dir.go")).unwrap();

        let units: Vec<SourceUnit> = directory_units(dir.path())
            .into_iter()
            .map(|u| u.unwrap())
            .collect();
        assert_eq!(
            units,
            vec![
                SourceUnit::File(dir.path().join(".hidden.go")),
                SourceUnit::File(dir.path().join("a.go")),
                SourceUnit::File(dir.path().join("b.go")),
            ]
        );
    }

    #[test]
    fn test_classify() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.go");
        fs::write(&file, "package main\n").unwrap();
        assert_eq!(classify(dir.path()).unwrap(), PathKind::Directory);
        assert_eq!(classify(&file).unwrap(), PathKind::File);
        let err = classify(&dir.path().join("missing.go")).unwrap_err();
        assert!(matches!(err, Error::Path { .. }));
        assert!(err.to_string().starts_with("stat "));
    }

    #[test]
    fn test_read_units() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.go");
        fs::write(&file, "package main\n").unwrap();

        let mut stdin = Cursor::new(b"package stdin\n".to_vec());
        assert_eq!(SourceUnit::Stdin.read(&mut stdin).unwrap(), b"package stdin\n");
        assert_eq!(SourceUnit::Stdin.identifier(), "<no filename>");

        let unit = SourceUnit::File(file);
        assert_eq!(unit.read(&mut std::io::empty()).unwrap(), b"package main\n");

        let missing = SourceUnit::File(dir.path().join("gone.go"));
        let err = missing.read(&mut std::io::empty()).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entry_fails_on_its_own_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "package a\n").unwrap();
        let dangling = dir.path().join("b.go");
        std::os::unix::fs::symlink(dir.path().join("nowhere.go"), &dangling).unwrap();

        let units: Vec<SourceUnit> = directory_units(dir.path())
            .into_iter()
            .map(|u| u.unwrap())
            .collect();
        assert_eq!(units.len(), 2);
        assert_eq!(units[1], SourceUnit::File(dangling.clone()));

        let err = units[1].read(&mut std::io::empty()).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.to_string().starts_with(&format!("read {}:", dangling.display())));
    }

    #[test]
    fn test_vanished_directory_is_a_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");
        fs::create_dir(&gone).unwrap();
        fs::remove_dir(&gone).unwrap();

        let units = directory_units(&gone);
        assert_eq!(units.len(), 1);
        match &units[0] {
            Err(Error::Path { path, .. }) => assert_eq!(path, &gone),
            other => panic!("expected a path error, got {:?}", other),
        }
    }
}
