//! Test utilities for creating temporary log files and mutating them between polls.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct TempLogFile {
    pub path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TempLogFile {
    /// Create a new, empty temporary log file
    pub fn new() -> std::io::Result<Self> {
        let temp_file = Self::missing()?;
        File::create(&temp_file.path)?;
        Ok(temp_file)
    }

    /// Reserve a path in a fresh temporary directory without creating the file
    pub fn missing() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("test.log");

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a temporary log file holding exactly `content`
    pub fn with_content(content: &str) -> std::io::Result<Self> {
        let temp_file = Self::new()?;
        temp_file.append_raw(content)?;
        Ok(temp_file)
    }

    /// Append `content` followed by a newline
    pub fn append_line(&self, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        writeln!(file, "{}", content)?;
        file.flush()?;
        Ok(())
    }

    /// Append `content` exactly as given
    pub fn append_raw(&self, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Truncate the file in place (copytruncate-style rotation)
    pub fn truncate(&self) -> std::io::Result<()> {
        File::create(&self.path)?;
        Ok(())
    }

    /// Swap in a brand new file at the same path (rename-style rotation)
    pub fn replace_with(&self, content: &str) -> std::io::Result<()> {
        let staged = self.path.with_extension("new");
        fs::write(&staged, content)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }

    pub fn remove(&self) -> std::io::Result<()> {
        fs::remove_file(&self.path)
    }

    /// Get the path to the temporary file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_log_file_creation() {
        let temp_file = TempLogFile::new().unwrap();
        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_missing_does_not_create() {
        let temp_file = TempLogFile::missing().unwrap();
        assert!(!temp_file.path().exists());
        assert!(temp_file.path().parent().unwrap().exists());
    }

    #[test]
    fn test_append_line_and_raw() {
        let temp_file = TempLogFile::new().unwrap();
        temp_file.append_line("line 1").unwrap();
        temp_file.append_raw("partial").unwrap();

        let content = fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "line 1\npartial");
    }

    #[test]
    fn test_truncate() {
        let temp_file = TempLogFile::with_content("initial content\n").unwrap();
        temp_file.truncate().unwrap();

        let content = fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_replace_with() {
        let temp_file = TempLogFile::with_content("old\n").unwrap();
        temp_file.replace_with("new\n").unwrap();

        let content = fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "new\n");
    }
}
