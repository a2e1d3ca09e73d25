use std::path::{Path, PathBuf};

/// A working directory under inspection.
#[derive(Debug, Clone)]
pub struct Repository {
    pub path: PathBuf,
    pub name: String,
    pub has_git: bool,
}

impl Repository {
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let canonical = path.canonicalize()?;
        if !canonical.is_dir() {
            anyhow::bail!("Not a directory: {}", canonical.display());
        }
        Ok(Self::at(&canonical))
    }

    /// Takes the path as given, without resolving it.
    pub fn at(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path: path.to_path_buf(),
            name,
            has_git: path.join(".git").exists(),
        }
    }
}
