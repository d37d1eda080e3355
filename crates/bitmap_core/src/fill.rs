//! Flood fill
//!
//! Recolours the maximal 4-connected region sharing the start cell's
//! original colour. Breadth-first over a `VecDeque`; a cell is marked
//! visited when it is enqueued, so each cell enters the queue at most once.

use std::collections::VecDeque;

use tracing::trace;

use crate::canvas::{Canvas, Colour, Position};
use crate::error::CanvasError;

impl Canvas {
    /// Flood fill from `(col, row)` with `colour`
    ///
    /// Returns the number of cells recoloured. Filling a region that already
    /// has the target colour recolours nothing.
    pub fn fill(&mut self, col: usize, row: usize, colour: Colour) -> Result<usize, CanvasError> {
        let origin = self.get(col, row).ok_or_else(|| CanvasError::OutOfCanvas {
            coords: vec![col, row],
        })?;

        if origin == colour {
            return Ok(0);
        }

        let mut visited = vec![false; self.width() * self.height()];
        let mut queue = VecDeque::new();

        let start = Position::new(col, row);
        visited[self.offset(col, row)] = true;
        queue.push_back(start);

        let mut filled = 0;
        while let Some(pos) = queue.pop_front() {
            let i = self.offset(pos.col, pos.row);
            self.cells_mut()[i] = colour;
            filled += 1;

            for next in self.neighbours(pos) {
                let j = self.offset(next.col, next.row);
                if !visited[j] && self.pixel_at(next.col, next.row) == origin {
                    visited[j] = true;
                    queue.push_back(next);
                }
            }
        }

        trace!(
            "Filled {} cells from ({}, {}) with {}",
            filled,
            col,
            row,
            colour
        );

        Ok(filled)
    }
}
