use crate::utils::{guess_content_type, sanitize_file_name};
use bytes::Bytes;
use std::{fs, io, path::Path};

/// A single file picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub content_type: String,
    pub content: Bytes,
}

impl Attachment {
    /// The content type is guessed from the name's extension.
    #[must_use]
    pub fn new(name: &str, content: impl Into<Bytes>) -> Self {
        let name = sanitize_file_name(name).into_owned();
        Self {
            content_type: guess_content_type(&name).to_owned(),
            name,
            content: content.into(),
        }
    }

    /// Reads a file from disk. The declared name is the path's file name.
    ///
    /// # Errors
    /// - If the file can't be read
    /// - If the path has no file name component
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} has no file name", path.display()),
                )
            })?;
        let content = fs::read(path)?;
        log::debug!("read attachment {} ({} bytes)", name, content.len());
        Ok(Self::new(&name, content))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
