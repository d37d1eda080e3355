//! Script line sources

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::SourceError;

/// An in-memory script, readable any number of times
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSource {
    name: String,
    text: String,
}

impl LineSource {
    /// Read the script at `path`
    pub fn open(path: Option<&Path>) -> Result<Self, SourceError> {
        let path = path.ok_or(SourceError::NoSource)?;

        if !path.is_file() {
            return Err(SourceError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound {
                path: path.to_path_buf(),
            },
            _ => SourceError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        debug!("Loaded {} ({} bytes)", path.display(), text.len());

        Ok(Self {
            name: path.display().to_string(),
            text,
        })
    }

    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines paired with their 1-based line numbers, without line endings
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.text.lines().enumerate().map(|(i, line)| (i + 1, line))
    }
}
