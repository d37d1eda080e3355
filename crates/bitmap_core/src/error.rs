//! Error types for bitmap_core
//!
//! Every failure aborts the run, so each error carries the context a caller
//! needs to point the user at the offending line.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::canvas::MAX_DIMENSION;

/// Errors raised while locating or reading the script source
#[derive(Error, Debug)]
pub enum SourceError {
    /// No source path was supplied
    #[error("Please supply a file")]
    NoSource,

    /// The path does not name a readable file
    #[error("Please provide the correct file ({})", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised when the canvas dimensions are rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasSizeError {
    /// `I` was given the wrong number of dimensions
    #[error("Specify width and height of canvas")]
    MissingDimensions { found: usize },

    /// A dimension is not an integer (`X`, `2.3`, ...)
    #[error("Width and height must be integers")]
    NotInteger { value: String },

    /// A dimension is zero or negative
    #[error("Width and height cannot be non-numbers or less than 1")]
    TooSmall { value: String },

    /// A dimension exceeds the maximum canvas size
    #[error("Width and height cannot be bigger than {}", MAX_DIMENSION)]
    TooLarge { value: String },
}

/// Errors raised by drawing operations on an existing canvas
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// One of the coordinates falls outside `[1,width] x [1,height]`
    #[error("Cannot draw at {}", join_coords(.coords))]
    OutOfCanvas { coords: Vec<usize> },
}

fn join_coords(coords: &[usize]) -> String {
    coords
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run-level error for a bitmap script
#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The first command was not `I`
    ///
    /// `line` is 0 when the script has no lines at all.
    #[error("Commands must start with a canvas size command")]
    CanvasSizeNotSpecified { line: usize },

    /// `I` appeared after the canvas already exists
    #[error("Canvas size specified for the second time on line {line}")]
    CanvasAlreadySpecified { line: usize },

    #[error("{source} on line {line}")]
    CanvasSize {
        line: usize,
        #[source]
        source: CanvasSizeError,
    },

    #[error("Unknown command {command} on line {line}")]
    UnknownCommand { command: String, line: usize },

    #[error("Please supply all arguments for the {command} command on line {line}")]
    MissingArguments {
        command: char,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[error("You supplied too many arguments for the {command} command on line {line}")]
    TooManyArguments {
        command: char,
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Arguments have the right count but not the right shape
    #[error("Arguments {arguments:?} don't match template [{}] on line {line}", .template.join(", "))]
    ArgumentShape {
        command: char,
        arguments: Vec<String>,
        template: Vec<&'static str>,
        line: usize,
    },

    #[error("{source} on line {line}")]
    Canvas {
        line: usize,
        #[source]
        source: CanvasError,
    },

    /// Writing a printed canvas failed
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl EditorError {
    /// The 1-based script line that triggered the error, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            EditorError::Source(_) | EditorError::Output(_) => None,
            EditorError::CanvasSizeNotSpecified { line: 0 } => None,
            EditorError::CanvasSizeNotSpecified { line }
            | EditorError::CanvasAlreadySpecified { line }
            | EditorError::CanvasSize { line, .. }
            | EditorError::UnknownCommand { line, .. }
            | EditorError::MissingArguments { line, .. }
            | EditorError::TooManyArguments { line, .. }
            | EditorError::ArgumentShape { line, .. }
            | EditorError::Canvas { line, .. } => Some(*line),
        }
    }
}

/// Result type for bitmap_core operations
pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_canvas_message() {
        let err = CanvasError::OutOfCanvas {
            coords: vec![1, 2, 5],
        };
        assert_eq!(err.to_string(), "Cannot draw at 1 2 5");
    }

    #[test]
    fn test_argument_shape_message() {
        let err = EditorError::ArgumentShape {
            command: 'L',
            arguments: vec!["1".into(), "2.2".into(), "G".into()],
            template: vec!["^[0-9]+$", "^[0-9]+$", "^[A-Z]$"],
            line: 2,
        };
        assert_eq!(
            err.to_string(),
            r#"Arguments ["1", "2.2", "G"] don't match template [^[0-9]+$, ^[0-9]+$, ^[A-Z]$] on line 2"#
        );
    }

    #[test]
    fn test_line_lookup() {
        assert_eq!(EditorError::CanvasSizeNotSpecified { line: 0 }.line(), None);
        assert_eq!(
            EditorError::CanvasSizeNotSpecified { line: 2 }.line(),
            Some(2)
        );
        assert_eq!(
            EditorError::CanvasAlreadySpecified { line: 7 }.line(),
            Some(7)
        );
        let err = EditorError::Canvas {
            line: 3,
            source: CanvasError::OutOfCanvas { coords: vec![5, 5] },
        };
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.to_string(), "Cannot draw at 5 5 on line 3");
    }
}
