//! Bitmap Editor Core
//!
//! This crate interprets bitmap editor scripts:
//!
//! - **Canvas**: a fixed-size grid of single-letter colour labels with
//!   1-based coordinates, pixel and line primitives, and a textual dump
//! - **Flood Fill**: 4-connected region recolouring
//! - **Commands**: the closed command set with arity and argument templates
//! - **Editor**: the dispatcher that creates the canvas on the first line and
//!   applies every following line, failing fast on the first bad one
//! - **Line Source**: file-backed scripts with 1-based line numbers
//!
//! # Example
//!
//! ```rust
//! let mut out = Vec::new();
//! let canvas = bitmap_core::run_script("I 4 3\nH 1 2 3 G\nS\n", &mut out).unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "OOOO\nOOOO\nGGOO\n");
//! assert_eq!(canvas.width(), 4);
//! ```

pub mod canvas;
pub mod command;
pub mod editor;
pub mod error;
pub mod fill;
pub mod source;

use std::io::Write;

pub use canvas::{Canvas, Colour, Position, MAX_DIMENSION};
pub use command::{ArgShape, Command, CommandKind, RawLine};
pub use editor::{Editor, EditorState, Step};
pub use error::{CanvasError, CanvasSizeError, EditorError, Result, SourceError};
pub use source::LineSource;

/// Run every line of `source`, writing printed canvases to `out`
pub fn run_source<W: Write + ?Sized>(source: &LineSource, out: &mut W) -> Result<Canvas> {
    let mut editor = Editor::new();
    editor.run(source.lines(), out)?;
    editor
        .into_canvas()
        .ok_or(EditorError::CanvasSizeNotSpecified { line: 0 })
}

/// Run a script held in a string
pub fn run_script<W: Write + ?Sized>(script: &str, out: &mut W) -> Result<Canvas> {
    run_source(&LineSource::from_text("<script>", script), out)
}
