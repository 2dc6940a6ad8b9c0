//! Centralized filesystem operations for better testability.
//!
//! Commands and the library API go through the `FileSystem` trait so tests
//! can run against an in-memory implementation.

use std::io::{self, Write};
use std::path::Path;
use std::time::SystemTime;

/// Trait for filesystem operations, enabling dependency injection and testing.
pub trait FileSystem: Send + Sync {
    /// Read the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write content to a file, creating it if it doesn't exist.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Last modification time of a file.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Open a file for writing, truncating any previous content.
    fn create_file(&self, path: &Path) -> io::Result<Box<dyn Write>>;
}

/// Real filesystem implementation using std::fs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn create_file(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(io::BufWriter::new(std::fs::File::create(path)?)))
    }
}

/// Shared real filesystem for callers that don't inject one.
pub fn default_fs() -> &'static RealFs {
    static INSTANCE: RealFs = RealFs;
    &INSTANCE
}
