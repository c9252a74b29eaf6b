#![forbid(unsafe_code)]

//! Driving children that size and place themselves.
//!
//! [`Flow`] works on plain [`FlowItem`]s. A [`FlowContainer`] sits between a
//! parent and a list of [`FlowChild`]ren: it asks each child for its size,
//! runs the flow, and hands each placed rectangle back to its child.
//!
//! ```text
//! parent ── measure(w, h) ──▶ FlowContainer ── measure(cw, ch) ──▶ child
//!        ◀── Size ───────────               ◀── Size ────────────
//! parent ── layout(width) ──▶ FlowContainer ── commit(rect) ─────▶ child
//! ```

use flowbox_core::geometry::{Rect, Sides, Size};

use crate::Constraint;
use crate::flow::{Flow, FlowItem};
use crate::layout::FlowLayout;
use crate::visibility::Visibility;

/// A box the container can size and place.
pub trait FlowChild {
    /// Resolve the child's intrinsic size under the given constraints.
    ///
    /// Called once per child on every measure pass, gone children included.
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size;

    /// The size resolved by the most recent [`measure`](Self::measure).
    fn measured_size(&self) -> Size;

    /// Margin around the child.
    fn margin(&self) -> Sides {
        Sides::ZERO
    }

    fn visibility(&self) -> Visibility {
        Visibility::Visible
    }

    /// Accept the rectangle the layout pass assigned.
    fn commit(&mut self, rect: Rect);
}

/// A flow container: configuration plus the outputs of its latest passes.
///
/// Each pass takes `&mut self`, so a container never runs two passes at once.
#[derive(Debug, Clone, Default)]
pub struct FlowContainer {
    flow: Flow,
    measured: Option<Size>,
    last: Option<FlowLayout>,
}

impl FlowContainer {
    /// Create a container with the given flow configuration.
    pub fn new(flow: Flow) -> Self {
        Self {
            flow,
            measured: None,
            last: None,
        }
    }

    /// The flow configuration.
    #[must_use]
    pub const fn flow(&self) -> &Flow {
        &self.flow
    }

    /// Replace the configuration, dropping any results computed with the old one.
    pub fn set_flow(&mut self, flow: Flow) {
        self.flow = flow;
        self.clear();
    }

    /// Measure every child, then compute the container size.
    ///
    /// May be called several times with different constraints before a layout
    /// pass; each call replaces [`measured_size`](Self::measured_size).
    pub fn measure<C: FlowChild>(
        &mut self,
        children: &mut [C],
        width: Constraint,
        height: Constraint,
    ) -> Size {
        let (child_width, child_height) = self.flow.child_constraints(width, height);
        let items: Vec<FlowItem> = children
            .iter_mut()
            .map(|child| FlowItem {
                size: child.measure(child_width, child_height),
                margin: child.margin(),
                visibility: child.visibility(),
            })
            .collect();

        let size = self.flow.measure(&items, width, height);
        self.measured = Some(size);
        size
    }

    /// Place the children in a container `width` wide and commit each rectangle.
    ///
    /// Uses the sizes children resolved in their last measure. Gone children
    /// are not committed.
    pub fn layout<C: FlowChild>(&mut self, children: &mut [C], width: u32) -> &FlowLayout {
        let items: Vec<FlowItem> = children.iter().map(item_of).collect();
        let layout = self.flow.layout(&items, width);

        for (index, rect) in layout.placed() {
            children[index].commit(rect);
        }

        self.last.insert(layout)
    }

    /// Size reported by the latest measure pass.
    #[must_use]
    pub const fn measured_size(&self) -> Option<Size> {
        self.measured
    }

    /// Result of the latest layout pass.
    #[must_use]
    pub const fn last_layout(&self) -> Option<&FlowLayout> {
        self.last.as_ref()
    }

    /// Forget the latest results.
    pub fn clear(&mut self) {
        self.measured = None;
        self.last = None;
    }
}

fn item_of<C: FlowChild>(child: &C) -> FlowItem {
    FlowItem {
        size: child.measured_size(),
        margin: child.margin(),
        visibility: child.visibility(),
    }
}
