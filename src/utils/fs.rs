//! Filesystem helpers shared by scaffolding and config loading.

use std::{
    env,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Outcome of [`create_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// File did not exist and was written.
    Created,
    /// File already existed and was left untouched.
    Exists,
}

/// Atomically create `path` with `content`, never touching an existing file.
///
/// Existence check and creation are one `O_CREAT | O_EXCL` open, so two
/// concurrent callers can never both observe "absent" for the same path.
pub fn create_new(path: &Path, content: &[u8]) -> io::Result<CreateOutcome> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(CreateOutcome::Exists),
        Err(e) => return Err(e),
    };

    if let Err(e) = file.write_all(content).and_then(|()| file.sync_all()) {
        // A half-written file would be skipped forever by later runs
        drop(file);
        fs::remove_file(path).ok();
        return Err(e);
    }

    Ok(CreateOutcome::Created)
}

/// Normalize a path to absolute, using canonicalize if the path exists
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Expand `~` and resolve `path` against `root` unless it is already absolute.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
    if expanded.is_absolute() {
        normalize_path(&expanded)
    } else {
        normalize_path(&root.join(expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Barrier, thread};
    use tempfile::TempDir;

    #[test]
    fn test_create_new_writes_absent_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Intro.md");

        let outcome = create_new(&path, b"hello").unwrap();

        assert_eq!(outcome, CreateOutcome::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_create_new_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Intro.md");
        fs::write(&path, "hand written").unwrap();

        let outcome = create_new(&path, b"placeholder").unwrap();

        assert_eq!(outcome, CreateOutcome::Exists);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand written");
    }

    #[test]
    fn test_create_new_concurrent_writers_single_winner() {
        const WRITERS: usize = 16;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Intro.md");
        let barrier = Barrier::new(WRITERS);

        let outcomes: Vec<(String, CreateOutcome)> = thread::scope(|scope| {
            let handles: Vec<_> = (0..WRITERS)
                .map(|i| {
                    let (path, barrier) = (&path, &barrier);
                    scope.spawn(move || {
                        let content = format!("writer {i}");
                        barrier.wait();
                        let outcome = create_new(path, content.as_bytes()).unwrap();
                        (content, outcome)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners: Vec<_> = outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == CreateOutcome::Created)
            .collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|(_, outcome)| *outcome == CreateOutcome::Exists)
                .count(),
            WRITERS - 1
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), winners[0].0);
    }

    #[test]
    fn test_create_new_missing_parent_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("Intro.md");

        let err = create_new(&path, b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_normalize_path_relative_becomes_absolute() {
        let normalized = normalize_path(Path::new("relative/path/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_resolve_path_absolute_kept() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_path(Path::new("/elsewhere"), dir.path());
        assert_eq!(resolved, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_path_relative_joined() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_path(dir.path(), Path::new("chapters"));
        assert!(resolved.ends_with("chapters"));
        assert!(resolved.starts_with(dir.path()));
    }
}
