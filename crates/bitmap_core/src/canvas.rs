//! Canvas model
//!
//! A fixed-size grid of colour labels addressed with 1-based `(column, row)`
//! coordinates. Storage is a single row-major buffer; every drawing
//! primitive validates its coordinates before touching a cell, so a failed
//! operation never leaves a partial mutation behind.

use std::fmt;

use tracing::debug;

use crate::error::{CanvasError, CanvasSizeError};

/// Largest accepted width or height
pub const MAX_DIMENSION: usize = 250;

// =============================================================================
// Colour
// =============================================================================

/// A single-letter colour label (`A`..=`Z`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Colour(u8);

impl Colour {
    /// Label of a freshly created or cleared cell
    pub const DEFAULT: Colour = Colour(b'O');

    /// Build a colour from an uppercase ASCII letter
    pub fn new(label: char) -> Option<Self> {
        label
            .is_ascii_uppercase()
            .then(|| Colour(label as u8))
    }

    /// Parse a colour argument, which must be exactly one uppercase letter
    pub fn parse(arg: &str) -> Option<Self> {
        let mut chars = arg.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =============================================================================
// Position
// =============================================================================

/// A 1-based `(column, row)` coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl From<(usize, usize)> for Position {
    fn from((col, row): (usize, usize)) -> Self {
        Self::new(col, row)
    }
}

// =============================================================================
// Canvas
// =============================================================================

/// Grid of colour labels, `height` rows of `width` cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Colour>,
}

impl Canvas {
    /// Create a canvas filled with [`Colour::DEFAULT`]
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasSizeError> {
        for dim in [width, height] {
            if dim < 1 {
                return Err(CanvasSizeError::TooSmall {
                    value: dim.to_string(),
                });
            }
        }
        for dim in [width, height] {
            if dim > MAX_DIMENSION {
                return Err(CanvasSizeError::TooLarge {
                    value: dim.to_string(),
                });
            }
        }

        debug!("Creating {}x{} canvas", width, height);

        Ok(Self {
            width,
            height,
            cells: vec![Colour::DEFAULT; width * height],
        })
    }

    /// Create a canvas from the raw width and height arguments of `I`
    ///
    /// Both arguments are checked for integrality before either is checked
    /// for range, so `I 0 X` reports the non-integer rather than the zero.
    pub fn from_dimensions(width: &str, height: &str) -> Result<Self, CanvasSizeError> {
        let dims = [
            (width, parse_dimension(width)?),
            (height, parse_dimension(height)?),
        ];

        for (raw, dim) in dims {
            if dim < 1 {
                return Err(CanvasSizeError::TooSmall {
                    value: raw.to_string(),
                });
            }
        }
        for (raw, dim) in dims {
            if dim > MAX_DIMENSION as i128 {
                return Err(CanvasSizeError::TooLarge {
                    value: raw.to_string(),
                });
            }
        }

        // Both dimensions are within 1..=MAX_DIMENSION here
        Self::new(dims[0].1 as usize, dims[1].1 as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(col, row)` lies inside `[1,width] x [1,height]`
    pub fn contains(&self, col: usize, row: usize) -> bool {
        (1..=self.width).contains(&col) && (1..=self.height).contains(&row)
    }

    /// Colour at `(col, row)`
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the canvas. Use [`Canvas::get`]
    /// when the coordinate has not been validated.
    pub fn pixel_at(&self, col: usize, row: usize) -> Colour {
        match self.get(col, row) {
            Some(colour) => colour,
            None => panic!(
                "pixel ({}, {}) is outside the {}x{} canvas",
                col, row, self.width, self.height
            ),
        }
    }

    /// Colour at `(col, row)`, or `None` outside the canvas
    pub fn get(&self, col: usize, row: usize) -> Option<Colour> {
        self.index(col, row).map(|i| self.cells[i])
    }

    /// Set a single cell
    pub fn set_pixel(&mut self, col: usize, row: usize, colour: Colour) -> Result<(), CanvasError> {
        let index = self.index(col, row).ok_or_else(|| CanvasError::OutOfCanvas {
            coords: vec![col, row],
        })?;
        self.cells[index] = colour;
        Ok(())
    }

    /// Draw the inclusive horizontal segment `col0..=col1` on `row`
    ///
    /// The endpoints may be given in either order.
    pub fn draw_hline(
        &mut self,
        col0: usize,
        col1: usize,
        row: usize,
        colour: Colour,
    ) -> Result<(), CanvasError> {
        if !self.contains(col0, row) || !self.contains(col1, row) {
            return Err(CanvasError::OutOfCanvas {
                coords: vec![col0, col1, row],
            });
        }

        let (start, end) = if col0 <= col1 { (col0, col1) } else { (col1, col0) };
        for col in start..=end {
            let i = self.offset(col, row);
            self.cells[i] = colour;
        }
        Ok(())
    }

    /// Draw the inclusive vertical segment `row0..=row1` on `col`
    ///
    /// The endpoints may be given in either order.
    pub fn draw_vline(
        &mut self,
        col: usize,
        row0: usize,
        row1: usize,
        colour: Colour,
    ) -> Result<(), CanvasError> {
        if !self.contains(col, row0) || !self.contains(col, row1) {
            return Err(CanvasError::OutOfCanvas {
                coords: vec![col, row0, row1],
            });
        }

        let (start, end) = if row0 <= row1 { (row0, row1) } else { (row1, row0) };
        for row in start..=end {
            let i = self.offset(col, row);
            self.cells[i] = colour;
        }
        Ok(())
    }

    /// Reset every cell to [`Colour::DEFAULT`]
    pub fn clear(&mut self) {
        self.cells.fill(Colour::DEFAULT);
    }

    /// Rows of the canvas as strings, top row first
    pub fn serialize(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.as_char()).collect())
            .collect()
    }

    /// In-bounds 4-connected neighbours of `pos`
    pub fn neighbours(&self, pos: Position) -> Vec<Position> {
        let Position { col, row } = pos;
        let mut out = Vec::with_capacity(4);
        if col > 1 {
            out.push(Position::new(col - 1, row));
        }
        if col < self.width {
            out.push(Position::new(col + 1, row));
        }
        if row > 1 {
            out.push(Position::new(col, row - 1));
        }
        if row < self.height {
            out.push(Position::new(col, row + 1));
        }
        out
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        self.contains(col, row).then(|| self.offset(col, row))
    }

    /// Flat offset of an already validated coordinate
    pub(crate) fn offset(&self, col: usize, row: usize) -> usize {
        (row - 1) * self.width + (col - 1)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Colour] {
        &mut self.cells
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.serialize() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

fn parse_dimension(raw: &str) -> Result<i128, CanvasSizeError> {
    match raw.parse::<i128>() {
        Ok(n) => Ok(n),
        // A run of digits too long to parse is still an integer, just a huge one
        Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => Ok(i128::MAX),
        Err(_) => Err(CanvasSizeError::NotInteger {
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colour(c: char) -> Colour {
        Colour::new(c).unwrap()
    }

    fn count_cells(canvas: &Canvas, label: char) -> usize {
        canvas
            .serialize()
            .iter()
            .map(|row| row.chars().filter(|&c| c == label).count())
            .sum()
    }

    #[test]
    fn test_new_dimensions() {
        let canvas = Canvas::new(2, 3).unwrap();
        let rows = canvas.serialize();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r == "OO"));
    }

    #[test]
    fn test_new_bounds() {
        assert!(Canvas::new(1, 1).is_ok());
        assert!(Canvas::new(250, 250).is_ok());
        assert!(matches!(
            Canvas::new(0, 3),
            Err(CanvasSizeError::TooSmall { .. })
        ));
        assert!(matches!(
            Canvas::new(3, 0),
            Err(CanvasSizeError::TooSmall { .. })
        ));
        assert!(matches!(
            Canvas::new(251, 250),
            Err(CanvasSizeError::TooLarge { .. })
        ));
        assert!(matches!(
            Canvas::new(250, 251),
            Err(CanvasSizeError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_from_dimensions() {
        let canvas = Canvas::from_dimensions("4", "3").unwrap();
        assert_eq!((canvas.width(), canvas.height()), (4, 3));

        assert_eq!(
            Canvas::from_dimensions("2.3", "4"),
            Err(CanvasSizeError::NotInteger {
                value: "2.3".into()
            })
        );
        assert_eq!(
            Canvas::from_dimensions("4", "X"),
            Err(CanvasSizeError::NotInteger { value: "X".into() })
        );
        assert_eq!(
            Canvas::from_dimensions("-2", "2"),
            Err(CanvasSizeError::TooSmall { value: "-2".into() })
        );
        assert_eq!(
            Canvas::from_dimensions("251", "250"),
            Err(CanvasSizeError::TooLarge {
                value: "251".into()
            })
        );
        assert!(matches!(
            Canvas::from_dimensions("1", "99999999999999999999999"),
            Err(CanvasSizeError::TooLarge { .. })
        ));
        // Integrality is checked before range
        assert!(matches!(
            Canvas::from_dimensions("0", "X"),
            Err(CanvasSizeError::NotInteger { .. })
        ));
    }

    #[test]
    fn test_colour_parse() {
        assert_eq!(Colour::parse("B"), Some(colour('B')));
        assert_eq!(Colour::parse("b"), None);
        assert_eq!(Colour::parse("BB"), None);
        assert_eq!(Colour::parse("4"), None);
        assert_eq!(Colour::parse(""), None);
        assert_eq!(Colour::default().as_char(), 'O');
    }

    #[test]
    fn test_set_pixel() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        canvas.set_pixel(1, 2, colour('B')).unwrap();
        assert_eq!(canvas.pixel_at(1, 2), colour('B'));
        assert_eq!(count_cells(&canvas, 'B'), 1);
        assert_eq!(count_cells(&canvas, 'O'), 11);
    }

    #[test]
    fn test_set_pixel_out_of_canvas() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        let before = canvas.clone();

        for (col, row) in [(0, 1), (1, 0), (5, 1), (1, 4), (5, 5)] {
            let err = canvas.set_pixel(col, row, colour('R')).unwrap_err();
            assert_eq!(
                err,
                CanvasError::OutOfCanvas {
                    coords: vec![col, row]
                }
            );
        }
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_hline_either_order() {
        let mut forward = Canvas::new(5, 3).unwrap();
        let mut backward = Canvas::new(5, 3).unwrap();
        forward.draw_hline(2, 4, 3, colour('G')).unwrap();
        backward.draw_hline(4, 2, 3, colour('G')).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.serialize(), vec!["OOOOO", "OOOOO", "OGGGO"]);
    }

    #[test]
    fn test_vline_either_order() {
        let mut forward = Canvas::new(3, 4).unwrap();
        let mut backward = Canvas::new(3, 4).unwrap();
        forward.draw_vline(2, 1, 3, colour('W')).unwrap();
        backward.draw_vline(2, 3, 1, colour('W')).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.serialize(), vec!["OWO", "OWO", "OWO", "OOO"]);
    }

    #[test]
    fn test_line_out_of_canvas_is_atomic() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        let before = canvas.clone();

        assert_eq!(
            canvas.draw_hline(1, 5, 2, colour('R')),
            Err(CanvasError::OutOfCanvas {
                coords: vec![1, 5, 2]
            })
        );
        assert_eq!(
            canvas.draw_vline(1, 2, 5, colour('R')),
            Err(CanvasError::OutOfCanvas {
                coords: vec![1, 2, 5]
            })
        );
        assert!(canvas.draw_hline(0, 2, 1, colour('R')).is_err());
        assert!(canvas.draw_vline(1, 0, 2, colour('R')).is_err());
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut canvas = Canvas::new(3, 3).unwrap();
        canvas.draw_hline(1, 3, 2, colour('Z')).unwrap();
        canvas.clear();
        let once = canvas.clone();
        canvas.clear();

        assert_eq!(canvas, once);
        assert_eq!(count_cells(&canvas, 'O'), 9);
    }

    #[test]
    fn test_neighbours() {
        let canvas = Canvas::new(3, 3).unwrap();

        let corner = canvas.neighbours(Position::new(1, 1));
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&Position::new(2, 1)));
        assert!(corner.contains(&Position::new(1, 2)));

        let centre = canvas.neighbours(Position::new(2, 2));
        assert_eq!(centre.len(), 4);

        let edge = canvas.neighbours(Position::new(3, 2));
        assert_eq!(edge.len(), 3);
    }

    #[test]
    fn test_display() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.set_pixel(2, 1, colour('A')).unwrap();
        assert_eq!(canvas.to_string(), "OA\nOO\n");
    }
}
