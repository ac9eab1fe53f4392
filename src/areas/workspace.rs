use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The user's working directory, minus everything hidden.
///
/// Any path with a component starting with `.` is invisible to tracking;
/// this covers the `.knot` state directory itself. All paths handed out are
/// relative to the workspace root.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List all trackable files under a root, as workspace-relative paths
    ///
    /// A directory root expands to every non-ignored file underneath it; a
    /// file root yields just that file (or nothing, if it is ignored).
    pub fn list_files(&self, root_file_path: Option<PathBuf>) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => {
                let p = if p.is_absolute() { p } else { self.path.join(p) };

                if !p.exists() {
                    anyhow::bail!("The specified path does not exist: {:?}", p);
                }

                std::fs::canonicalize(p)?
            }
            None => self.path.clone().into(),
        };

        if root_file_path.is_dir() {
            Ok(WalkDir::new(&root_file_path)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| self.track_candidate(entry.path()))
                .collect::<Vec<_>>())
        } else {
            Ok(self.track_candidate(&root_file_path).into_iter().collect())
        }
    }

    fn track_candidate(&self, path: &Path) -> Option<PathBuf> {
        if !path.is_file() {
            return None;
        }

        let relative_path = path.strip_prefix(self.path.as_ref()).ok()?;
        if Self::is_ignored(relative_path) {
            None
        } else {
            Some(relative_path.to_path_buf())
        }
    }

    fn is_ignored(path: &Path) -> bool {
        // a single hidden component hides the whole path
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                name.to_string_lossy().starts_with('.')
            } else {
                false
            }
        })
    }

    pub fn path_exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).exists()
    }

    pub fn file_exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(Bytes::from(content))
    }

    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Unable to write file {}", full_path.display()))
    }

    /// Delete a file and any directories the deletion leaves empty
    pub fn delete_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        std::fs::remove_file(&full_path)
            .with_context(|| format!("Unable to delete file {}", full_path.display()))?;

        self.prune_empty_parent_dirs(&full_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Unable to remove empty directory {}", parent.display()))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
