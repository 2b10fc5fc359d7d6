// dirwatcher - core/listing.rs
//
// Single-level directory listing for the poll loop.
//
// Uses `walkdir` clamped to depth 1 so only the watched directory's own
// entries are returned; subdirectories are never descended into and are not
// part of the listing. Entries come back sorted by name so add events are
// logged in a stable order.
//
// Error policy:
//   - The directory itself missing, not a directory, or unreadable is a
//     `DirectoryAccessError` (the caller skips the iteration).
//   - A single entry that cannot be inspected is skipped with a debug log.
//   - Non-UTF-8 file names are skipped: they could never match a `&str`
//     extension and could not be reported faithfully.

use crate::util::error::DirectoryAccessError;
use std::io;
use std::path::Path;

/// List the names of all non-directory entries directly inside `root`.
pub fn list_directory(root: &Path) -> Result<Vec<String>, DirectoryAccessError> {
    // fs::metadata rather than Path::is_dir so PermissionDenied is not
    // reported as "does not exist".
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DirectoryAccessError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(e) => return Err(DirectoryAccessError::from_io(root.to_path_buf(), e)),
    }

    let walker = walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut names = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                // The root itself could not be read (e.g. removed or
                // permissions changed since the metadata check).
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("cannot read directory"));
                return Err(DirectoryAccessError::from_io(root.to_path_buf(), source));
            }
            Err(e) => {
                tracing::debug!(root = %root.display(), error = %e, "Listing: skipped entry");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => {
                tracing::debug!(
                    entry = %entry.path().display(),
                    "Listing: skipped non-UTF-8 file name"
                );
            }
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lists_files_sorted_and_skips_subdirectories() {
        let dir = TempDir::new().expect("tmpdir");
        fs::write(dir.path().join("b.txt"), b"").expect("write");
        fs::write(dir.path().join("a.log"), b"").expect("write");
        let sub = dir.path().join("nested.txt");
        fs::create_dir(&sub).expect("mkdir");
        fs::write(sub.join("deep.txt"), b"").expect("write");

        let names = list_directory(dir.path()).expect("list");
        assert_eq!(names, vec!["a.log".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn test_empty_directory_lists_nothing() {
        let dir = TempDir::new().expect("tmpdir");
        assert!(list_directory(dir.path()).expect("list").is_empty());
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let dir = TempDir::new().expect("tmpdir");
        let result = list_directory(&dir.path().join("missing"));
        assert!(matches!(result, Err(DirectoryAccessError::NotFound { .. })));
    }

    #[test]
    fn test_file_path_is_not_a_directory() {
        let dir = TempDir::new().expect("tmpdir");
        let file = dir.path().join("plain.txt");
        fs::write(&file, b"x").expect("write");
        let result = list_directory(&file);
        assert!(matches!(
            result,
            Err(DirectoryAccessError::NotADirectory { .. })
        ));
    }
}
