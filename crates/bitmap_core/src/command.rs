//! Bitmap script commands
//!
//! Every command line is `TOKEN ARG*`. The token selects a [`CommandKind`],
//! which carries the command's arity and argument template. Validation runs
//! in a fixed order: arity first, then per-argument shape, and only then are
//! the arguments converted into a typed [`Command`].

use std::sync::LazyLock;

use regex::Regex;

use crate::canvas::Colour;

use self::ArgShape::{Digits, Upper};

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ArgShape::Digits.pattern()).unwrap());
static UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ArgShape::Upper.pattern()).unwrap());

// =============================================================================
// Argument shapes
// =============================================================================

/// Expected shape of a single raw argument
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgShape {
    /// Unsigned decimal integer
    Digits,
    /// A single uppercase letter
    Upper,
}

impl ArgShape {
    pub const fn pattern(self) -> &'static str {
        match self {
            ArgShape::Digits => "^[0-9]+$",
            ArgShape::Upper => "^[A-Z]$",
        }
    }

    pub fn matches(self, arg: &str) -> bool {
        match self {
            ArgShape::Digits => DIGITS.is_match(arg),
            ArgShape::Upper => UPPER.is_match(arg),
        }
    }
}

// =============================================================================
// Command kinds
// =============================================================================

/// The closed set of script commands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Init,
    SetPixel,
    VLine,
    HLine,
    Clear,
    Print,
    Fill,
}

impl CommandKind {
    pub const ALL: [CommandKind; 7] = [
        CommandKind::Init,
        CommandKind::SetPixel,
        CommandKind::VLine,
        CommandKind::HLine,
        CommandKind::Clear,
        CommandKind::Print,
        CommandKind::Fill,
    ];

    /// Look up a single-character token
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::ALL.into_iter().find(|kind| kind.token() == c),
            _ => None,
        }
    }

    pub const fn token(self) -> char {
        match self {
            CommandKind::Init => 'I',
            CommandKind::SetPixel => 'L',
            CommandKind::VLine => 'V',
            CommandKind::HLine => 'H',
            CommandKind::Clear => 'C',
            CommandKind::Print => 'S',
            CommandKind::Fill => 'F',
        }
    }

    /// Expected shape of each argument, in order
    ///
    /// `I` has no template: its dimensions are checked by the canvas so that
    /// non-integer and out-of-range sizes get their own errors.
    pub const fn template(self) -> &'static [ArgShape] {
        match self {
            CommandKind::Init => &[],
            CommandKind::SetPixel => &[Digits, Digits, Upper],
            CommandKind::VLine => &[Digits, Digits, Digits, Upper],
            CommandKind::HLine => &[Digits, Digits, Digits, Upper],
            CommandKind::Clear => &[],
            CommandKind::Print => &[],
            CommandKind::Fill => &[Digits, Digits, Upper],
        }
    }

    pub const fn arity(self) -> usize {
        match self {
            CommandKind::Init => 2,
            _ => self.template().len(),
        }
    }

    /// Short grammar line, e.g. `L X Y C`
    pub const fn usage(self) -> &'static str {
        match self {
            CommandKind::Init => "I M N",
            CommandKind::SetPixel => "L X Y C",
            CommandKind::VLine => "V X Y1 Y2 C",
            CommandKind::HLine => "H X1 X2 Y C",
            CommandKind::Clear => "C",
            CommandKind::Print => "S",
            CommandKind::Fill => "F X Y C",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            CommandKind::Init => "Create an M x N canvas filled with O",
            CommandKind::SetPixel => "Colour the pixel at (X,Y) with C",
            CommandKind::VLine => "Draw a vertical line in column X from row Y1 to Y2",
            CommandKind::HLine => "Draw a horizontal line in row Y from column X1 to X2",
            CommandKind::Clear => "Reset every pixel to O",
            CommandKind::Print => "Print the canvas",
            CommandKind::Fill => "Fill the region containing (X,Y) with C",
        }
    }
}

// =============================================================================
// Parsed lines and typed commands
// =============================================================================

/// A script line split into its leading token and raw arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub token: &'a str,
    pub args: Vec<&'a str>,
}

impl<'a> RawLine<'a> {
    /// Split a line into the text before the first whitespace and the
    /// whitespace-separated arguments after it
    ///
    /// The token must start the line: a blank line or one with leading
    /// whitespace has an empty token, which matches no command.
    pub fn parse(line: &'a str) -> Self {
        let (token, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        Self {
            token,
            args: rest.split_whitespace().collect(),
        }
    }
}

/// Outcome of arity and shape validation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgCheck {
    Ok,
    TooFew,
    TooMany,
    Shape,
}

/// Check `args` against the arity and template of `kind`
pub fn check_args(kind: CommandKind, args: &[&str]) -> ArgCheck {
    let arity = kind.arity();
    if args.len() < arity {
        return ArgCheck::TooFew;
    }
    if args.len() > arity {
        return ArgCheck::TooMany;
    }

    let template = kind.template();
    if !template.iter().zip(args).all(|(shape, arg)| shape.matches(arg)) {
        return ArgCheck::Shape;
    }

    ArgCheck::Ok
}

/// A validated drawing command
///
/// `I` is not represented here: canvas construction is handled by the
/// editor's state machine rather than executed against a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SetPixel {
        col: usize,
        row: usize,
        colour: Colour,
    },
    VLine {
        col: usize,
        row0: usize,
        row1: usize,
        colour: Colour,
    },
    HLine {
        col0: usize,
        col1: usize,
        row: usize,
        colour: Colour,
    },
    Clear,
    Print,
    Fill {
        col: usize,
        row: usize,
        colour: Colour,
    },
}

impl Command {
    /// Build a command from arguments that already passed [`check_args`]
    ///
    /// Returns `None` for [`CommandKind::Init`] or if the arguments do not
    /// fit the template.
    pub fn from_args(kind: CommandKind, args: &[&str]) -> Option<Self> {
        let command = match (kind, args) {
            (CommandKind::Init, _) => return None,
            (CommandKind::SetPixel, [col, row, colour]) => Command::SetPixel {
                col: coord(col),
                row: coord(row),
                colour: Colour::parse(colour)?,
            },
            (CommandKind::VLine, [col, row0, row1, colour]) => Command::VLine {
                col: coord(col),
                row0: coord(row0),
                row1: coord(row1),
                colour: Colour::parse(colour)?,
            },
            (CommandKind::HLine, [col0, col1, row, colour]) => Command::HLine {
                col0: coord(col0),
                col1: coord(col1),
                row: coord(row),
                colour: Colour::parse(colour)?,
            },
            (CommandKind::Clear, []) => Command::Clear,
            (CommandKind::Print, []) => Command::Print,
            (CommandKind::Fill, [col, row, colour]) => Command::Fill {
                col: coord(col),
                row: coord(row),
                colour: Colour::parse(colour)?,
            },
            _ => return None,
        };
        Some(command)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SetPixel { .. } => CommandKind::SetPixel,
            Command::VLine { .. } => CommandKind::VLine,
            Command::HLine { .. } => CommandKind::HLine,
            Command::Clear => CommandKind::Clear,
            Command::Print => CommandKind::Print,
            Command::Fill { .. } => CommandKind::Fill,
        }
    }
}

/// Convert a digits-only argument; values too large for `usize` saturate
/// and are rejected later by the canvas bounds check.
fn coord(arg: &str) -> usize {
    arg.parse().unwrap_or(usize::MAX)
}
