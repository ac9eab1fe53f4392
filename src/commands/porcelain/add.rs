use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use std::io::Write;
use std::path::{Path, PathBuf};

impl Repository {
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        // Load the index file from the disk
        self.index_mut().rehydrate()?;

        for path in paths {
            // a missing path is reported, the rest of the batch still proceeds
            if !self.workspace().path_exists(Path::new(path)) {
                writeln!(self.writer(), "File {path} does not exist")?;
                continue;
            }

            // a directory path expands to every trackable file underneath it
            for file_path in self.workspace().list_files(Some(PathBuf::from(path)))? {
                let content = self.workspace().read_file(&file_path)?;
                let digest = self.database().store(&Blob::new(content))?;

                self.index_mut()
                    .add(file_path.to_string_lossy().to_string(), digest);
            }
        }

        self.index_mut().write_updates()?;

        Ok(())
    }
}
