#![forbid(unsafe_code)]

//! Wrapping flow layout.
//!
//! Boxes are placed left-to-right and wrap onto a new line when the next box
//! would overflow the container width. Lines stack top-to-bottom.
//!
//! - [`Flow`] - layout configuration with the two passes, [`Flow::measure`]
//!   and [`Flow::layout`]
//! - [`partition_into_lines`] - the single line-breaking rule both passes share
//! - [`FlowLayout`] - placement result with per-line diagnostics
//! - [`FlowContainer`] / [`FlowChild`] - drives children that size and place
//!   themselves
//! - [`debug`] - serializable snapshots and invariant checks
//!
//! # Example
//!
//! ```
//! use flowbox_layout::{Constraint, Flow, FlowItem, Rect, Size};
//!
//! let items = [
//!     FlowItem::new(100, 20),
//!     FlowItem::new(150, 20),
//!     FlowItem::new(100, 30),
//!     FlowItem::new(50, 10),
//! ];
//! let flow = Flow::new();
//!
//! let size = flow.measure(&items, Constraint::Exact(300), Constraint::Unbounded);
//! assert_eq!(size, Size::new(300, 50));
//!
//! let layout = flow.layout(&items, size.width);
//! assert_eq!(layout.line_count(), 2);
//! assert_eq!(layout.rect(2), Some(Rect::new(0, 20, 100, 30)));
//! ```

pub mod container;
pub mod debug;
pub mod flow;
pub mod layout;
pub mod visibility;

pub use container::{FlowChild, FlowContainer};
pub use flow::{Flow, FlowItem, GoneHandling, Line, partition_into_lines};
pub use flowbox_core::geometry::{Rect, Sides, Size};
pub use layout::FlowLayout;
pub use visibility::Visibility;

/// A sizing rule for one axis, handed down by the parent for a measure pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Constraint {
    /// The container is exactly this size.
    Exact(u32),
    /// Lines wrap at this size, but the reported size is the natural one.
    ///
    /// The container never clamps itself; the parent clamps if it must.
    AtMost(u32),
    /// No limit: nothing wraps.
    #[default]
    Unbounded,
}

impl Constraint {
    /// The width at which lines break, if any.
    #[inline]
    pub const fn limit(self) -> Option<u32> {
        match self {
            Constraint::Exact(size) | Constraint::AtMost(size) => Some(size),
            Constraint::Unbounded => None,
        }
    }

    /// Resolve the reported size: `Exact` wins, everything else reports `natural`.
    #[inline]
    pub const fn resolve(self, natural: u32) -> u32 {
        match self {
            Constraint::Exact(size) => size,
            Constraint::AtMost(_) | Constraint::Unbounded => natural,
        }
    }

    /// Shrink the constraint by `amount` (e.g. container padding).
    #[inline]
    pub const fn shrink(self, amount: u32) -> Self {
        match self {
            Constraint::Exact(size) => Constraint::Exact(size.saturating_sub(amount)),
            Constraint::AtMost(size) => Constraint::AtMost(size.saturating_sub(amount)),
            Constraint::Unbounded => Constraint::Unbounded,
        }
    }
}
