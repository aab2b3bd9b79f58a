//! Recursive discovery of data files under an archive directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Walks a directory tree and returns every file whose name ends with the
/// given suffix, matched case-insensitively.
///
/// Results are sorted by path, so runs over the same tree are stable.
pub fn list_data_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }
    let mut files = Vec::new();
    walk(dir, &suffix.to_lowercase(), &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, suffix: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, suffix, files)?;
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.to_lowercase().ends_with(suffix))
        {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("stream1/day")).unwrap();
        for name in &[
            "tas_day_Monty_hist_r1i1p1_gn_20150101-20151230.nc",
            "notes.txt",
        ] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::write(
            dir.path()
                .join("stream1/day/pr_day_Monty_hist_r1i1p1_gn_20150101-20151230.NC"),
            b"",
        )
        .unwrap();
        dir
    }

    #[test]
    fn finds_suffixed_files_recursively() {
        let dir = create_test_tree();
        let files = list_data_files(dir.path(), ".nc").unwrap();
        assert_eq!(files.len(), 2);
        // Sorted, and the uppercase extension still matches.
        assert!(files[0].to_str().unwrap().contains("stream1/day/pr_day"));
        assert!(files[1].to_str().unwrap().contains("tas_day"));
    }

    #[test]
    fn rejects_a_file_argument() {
        let dir = create_test_tree();
        let file = dir.path().join("notes.txt");
        assert!(list_data_files(&file, ".nc").is_err());
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(list_data_files(dir.path(), ".nc").unwrap().is_empty());
    }
}
