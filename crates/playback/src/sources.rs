use std::fmt::Debug;
use std::path::{Path, PathBuf};
use crate::driver::DriverError;

/// Generic trait for video inputs
/// Different backends can implement this for their specific source types
pub trait Source: Debug + Clone {
    /// Type-specific validation that the source is accessible
    fn validate(&self) -> Result<(), DriverError>;

    /// Get a human-readable description of this source
    fn description(&self) -> String;
}

/// A video file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FileSource {
    fn validate(&self) -> Result<(), DriverError> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(DriverError::NotFound(self.path.display().to_string()))
        }
    }

    fn description(&self) -> String {
        format!("File: {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_fails_validation() {
        let source = FileSource::new("/definitely/not/here.mp4");
        assert!(matches!(source.validate(), Err(DriverError::NotFound(_))));
    }

    #[test]
    fn directory_is_not_a_video() {
        let source = FileSource::new(std::env::temp_dir());
        assert!(source.validate().is_err());
    }

    #[test]
    fn description_names_the_path() {
        assert_eq!(FileSource::new("clip.mp4").description(), "File: clip.mp4");
    }
}
