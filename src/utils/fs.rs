use std::io;
use std::path::Path;
use walkdir::WalkDir;

pub fn path_exists(base: &Path, relative: &str) -> bool {
    base.join(relative).exists()
}

pub fn first_existing<'a>(base: &Path, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|c| path_exists(base, c))
}

/// True if `dir` directly contains a file ending in one of `extensions`.
pub fn has_files_with_extension(dir: &Path, extensions: &[&str]) -> bool {
    if !dir.is_dir() {
        return false;
    }
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .any(|e| {
            let name = e.file_name().to_string_lossy();
            extensions.iter().any(|ext| {
                let dot_ext = if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{}", ext)
                };
                name.ends_with(&dot_ext)
            })
        })
}

/// Total size of regular files under `path`. Symlinks are not followed.
pub fn dir_size(path: &Path) -> io::Result<u64> {
    let mut total = 0;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            total += entry.metadata().map_err(io::Error::from)?.len();
        }
    }
    Ok(total)
}

pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} TB", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_path_exists() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("test.txt"), "hello").unwrap();
        assert!(path_exists(tmp.path(), "test.txt"));
        assert!(!path_exists(tmp.path(), "missing.txt"));
    }

    #[test]
    fn test_first_existing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("COPYING"), "gpl").unwrap();
        assert_eq!(
            first_existing(tmp.path(), &["LICENSE", "LICENSE.md", "COPYING"]),
            Some("COPYING")
        );
        assert_eq!(first_existing(tmp.path(), &["LICENSE"]), None);
    }

    #[test]
    fn test_has_files_with_extension_is_shallow() {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("docs");
        fs::create_dir_all(docs.join("nested")).unwrap();
        fs::write(docs.join("nested/guide.md"), "# Guide").unwrap();
        assert!(!has_files_with_extension(&docs, &["md"]));

        fs::write(docs.join("index.md"), "# Docs").unwrap();
        assert!(has_files_with_extension(&docs, &["md"]));
        assert!(has_files_with_extension(&docs, &[".txt", ".md"]));
        assert!(!has_files_with_extension(&tmp.path().join("absent"), &["md"]));
    }

    #[test]
    fn test_dir_size_counts_nested_files() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("one.txt"), "12345").unwrap();
        fs::write(tmp.path().join("a/b/two.txt"), "1234567890").unwrap();
        assert_eq!(dir_size(tmp.path()).unwrap(), 15);
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(10), "10.00 B");
        assert_eq!(human_size(1536), "1.50 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(human_size(3 * 1024u64.pow(4)), "3.00 TB");
    }
}
