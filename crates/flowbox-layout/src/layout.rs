#![forbid(unsafe_code)]

//! Placement results.

use flowbox_core::geometry::{Rect, Size};

use crate::flow::{Line, content_size};

/// Result of [`Flow::layout`](crate::Flow::layout).
///
/// Holds the lines the placement pass used and one slot per input box. Gone
/// boxes have no rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowLayout {
    container_width: u32,
    lines: Vec<Line>,
    rects: Vec<Option<Rect>>,
}

impl FlowLayout {
    pub(crate) fn new(container_width: u32, lines: Vec<Line>, rects: Vec<Option<Rect>>) -> Self {
        Self {
            container_width,
            lines,
            rects,
        }
    }

    /// Width the boxes were placed in.
    #[must_use]
    pub const fn container_width(&self) -> u32 {
        self.container_width
    }

    /// Number of boxes the pass was given.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Lines in top-to-bottom order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Height of each line, margins included.
    pub fn line_heights(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines.iter().map(|line| line.height)
    }

    /// Line index holding box `index`.
    #[must_use]
    pub fn line_of(&self, index: usize) -> Option<usize> {
        if index >= self.rects.len() {
            return None;
        }
        // Lines are contiguous and ordered, so the first line ending past
        // `index` holds it.
        let line = self.lines.partition_point(|line| line.end <= index);
        (line < self.lines.len()).then_some(line)
    }

    /// Rectangle assigned to box `index`; `None` for gone or unknown boxes.
    #[must_use]
    pub fn rect(&self, index: usize) -> Option<Rect> {
        self.rects.get(index).copied().flatten()
    }

    /// All slots in input order.
    #[must_use]
    pub fn rects(&self) -> &[Option<Rect>] {
        &self.rects
    }

    /// Placed boxes as `(index, rect)` pairs.
    pub fn placed(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.rects
            .iter()
            .enumerate()
            .filter_map(|(index, rect)| rect.map(|rect| (index, rect)))
    }

    /// Widest line and summed line heights, padding excluded.
    #[must_use]
    pub fn content_size(&self) -> Size {
        content_size(&self.lines)
    }

    /// Smallest rectangle holding every placed box, or `None` if nothing was
    /// placed.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.placed()
            .map(|(_, rect)| rect)
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Index of the placed box containing the point.
    ///
    /// Boxes never overlap within a line and lines never overlap, so at most
    /// one box matches.
    #[must_use]
    pub fn hit_test(&self, x: u32, y: u32) -> Option<usize> {
        self.placed()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(index, _)| index)
    }
}
