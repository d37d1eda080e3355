//! Script dispatcher
//!
//! The [`Editor`] owns the canvas for one run and applies script lines in
//! order. It is a two-state machine: until an `I` line succeeds it only
//! accepts `I`; afterwards it accepts every other command and rejects a
//! second `I`. The first failing line ends the run, and whatever earlier
//! lines drew stays on the canvas.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::command::{check_args, ArgCheck, Command, CommandKind, RawLine};
use crate::error::{CanvasSizeError, EditorError, Result};

/// Dispatcher state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditorState {
    /// No canvas yet; only `I` is accepted
    #[default]
    AwaitingInit,
    /// Canvas created; drawing commands are accepted
    Ready(Canvas),
}

/// What applying a single line produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// `I` created the canvas
    Created,
    /// A drawing command changed (or left unchanged) the canvas
    Drawn,
    /// `S` produced these rows
    Printed(Vec<String>),
}

/// Applies bitmap script lines to a single canvas
#[derive(Debug, Default)]
pub struct Editor {
    state: EditorState,
    applied: usize,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The canvas, once `I` has been applied
    pub fn canvas(&self) -> Option<&Canvas> {
        match &self.state {
            EditorState::Ready(canvas) => Some(canvas),
            EditorState::AwaitingInit => None,
        }
    }

    pub fn into_canvas(self) -> Option<Canvas> {
        match self.state {
            EditorState::Ready(canvas) => Some(canvas),
            EditorState::AwaitingInit => None,
        }
    }

    /// Number of command lines applied successfully
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Apply one script line; `line_no` is 1-based and only used in errors
    ///
    /// Blank lines are not skipped: they have no command token and fail like
    /// any other unrecognised line.
    pub fn apply(&mut self, line_no: usize, line: &str) -> Result<Step> {
        let raw = RawLine::parse(line);

        let step = match &mut self.state {
            EditorState::AwaitingInit => {
                let canvas = init_canvas(&raw, line_no)?;
                self.state = EditorState::Ready(canvas);
                Step::Created
            }
            EditorState::Ready(canvas) => execute(canvas, &raw, line_no)?,
        };

        self.applied += 1;
        Ok(step)
    }

    /// Apply every line in order, writing each printed canvas to `out`
    ///
    /// Stops at the first error. A script with no commands at all fails with
    /// [`EditorError::CanvasSizeNotSpecified`].
    pub fn run<'a, I, W>(&mut self, lines: I, out: &mut W) -> Result<()>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
        W: Write + ?Sized,
    {
        self.run_with(lines, |rows| {
            for row in rows {
                writeln!(out, "{}", row)?;
            }
            Ok(())
        })?;
        out.flush().map_err(EditorError::Output)
    }

    /// Apply every line in order, handing each printed canvas to `on_print`
    pub fn run_with<'a, I, F>(&mut self, lines: I, mut on_print: F) -> Result<()>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
        F: FnMut(&[String]) -> io::Result<()>,
    {
        for (line_no, line) in lines {
            let step = self.apply(line_no, line).inspect_err(|err| {
                warn!("Rejected line {}: {}", line_no, err);
            })?;

            if let Step::Printed(rows) = step {
                on_print(&rows).map_err(EditorError::Output)?;
            }
        }

        if self.canvas().is_none() {
            return Err(EditorError::CanvasSizeNotSpecified { line: 0 });
        }
        Ok(())
    }
}

/// Handle the first command of a script, which must be `I`
fn init_canvas(raw: &RawLine<'_>, line: usize) -> Result<Canvas> {
    if CommandKind::from_token(raw.token) != Some(CommandKind::Init) {
        return Err(EditorError::CanvasSizeNotSpecified { line });
    }

    let canvas = match raw.args.as_slice() {
        [width, height] => Canvas::from_dimensions(width, height),
        args => Err(CanvasSizeError::MissingDimensions { found: args.len() }),
    }
    .map_err(|source| EditorError::CanvasSize { line, source })?;

    debug!(
        "Line {}: created {}x{} canvas",
        line,
        canvas.width(),
        canvas.height()
    );
    Ok(canvas)
}

/// Validate and run a command against an existing canvas
fn execute(canvas: &mut Canvas, raw: &RawLine<'_>, line: usize) -> Result<Step> {
    let kind = CommandKind::from_token(raw.token).ok_or_else(|| EditorError::UnknownCommand {
        command: raw.token.to_string(),
        line,
    })?;

    if kind == CommandKind::Init {
        return Err(EditorError::CanvasAlreadySpecified { line });
    }

    let command = validate(kind, &raw.args, line)?;
    debug!("Line {}: {:?}", line, command);

    let drawn = match command {
        Command::SetPixel { col, row, colour } => canvas.set_pixel(col, row, colour),
        Command::VLine {
            col,
            row0,
            row1,
            colour,
        } => canvas.draw_vline(col, row0, row1, colour),
        Command::HLine {
            col0,
            col1,
            row,
            colour,
        } => canvas.draw_hline(col0, col1, row, colour),
        Command::Clear => {
            canvas.clear();
            Ok(())
        }
        Command::Print => return Ok(Step::Printed(canvas.serialize())),
        Command::Fill { col, row, colour } => canvas.fill(col, row, colour).map(|filled| {
            debug!("Line {}: filled {} cells", line, filled);
        }),
    };

    drawn.map_err(|source| EditorError::Canvas { line, source })?;
    Ok(Step::Drawn)
}

fn validate(kind: CommandKind, args: &[&str], line: usize) -> Result<Command> {
    let command = kind.token();
    let expected = kind.arity();
    let found = args.len();

    let shape_error = || EditorError::ArgumentShape {
        command,
        arguments: args.iter().map(|a| a.to_string()).collect(),
        template: kind.template().iter().map(|s| s.pattern()).collect(),
        line,
    };

    match check_args(kind, args) {
        ArgCheck::TooFew => Err(EditorError::MissingArguments {
            command,
            expected,
            found,
            line,
        }),
        ArgCheck::TooMany => Err(EditorError::TooManyArguments {
            command,
            expected,
            found,
            line,
        }),
        ArgCheck::Shape => Err(shape_error()),
        ArgCheck::Ok => Command::from_args(kind, args).ok_or_else(shape_error),
    }
}
