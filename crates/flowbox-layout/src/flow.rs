#![forbid(unsafe_code)]

//! Line breaking and the two layout passes.
//!
//! Both passes go through [`partition_into_lines`], so the size reported by
//! [`Flow::measure`] and the positions produced by [`Flow::layout`] always come
//! from the same line breaks.

use std::ops::Range;

use flowbox_core::geometry::{Rect, Sides, Size};
use serde::{Deserialize, Serialize};

use crate::Constraint;
use crate::layout::FlowLayout;
use crate::visibility::Visibility;

/// What the flow does with [`Visibility::Gone`] boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoneHandling {
    /// Gone boxes take no space in either pass.
    ///
    /// They stay in the line they fall into so every box still belongs to a
    /// line, but they never add width or height and never cause a break.
    #[default]
    Collapse,
    /// Gone boxes are measured and line-broken like visible ones, then
    /// skipped at placement.
    ///
    /// The reported size can then include space nothing is drawn in. Kept for
    /// callers that need the historical sizing.
    ReserveSpace,
}

impl GoneHandling {
    /// Whether a box with `visibility` takes part in line breaking.
    #[inline]
    pub const fn takes_space(self, visibility: Visibility) -> bool {
        match self {
            GoneHandling::Collapse => !visibility.is_gone(),
            GoneHandling::ReserveSpace => true,
        }
    }
}

/// A child box as seen by one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FlowItem {
    /// Intrinsic size, already resolved by the child.
    pub size: Size,
    /// Space kept around the box.
    #[serde(default)]
    pub margin: Sides,
    #[serde(default)]
    pub visibility: Visibility,
}

impl FlowItem {
    /// A visible box with no margin.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            margin: Sides::ZERO,
            visibility: Visibility::Visible,
        }
    }

    /// Set the margin.
    #[must_use]
    pub fn margin(mut self, margin: impl Into<Sides>) -> Self {
        self.margin = margin.into();
        self
    }

    /// Set the visibility.
    #[must_use]
    pub const fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Intrinsic size plus margins on both axes.
    #[inline]
    pub const fn occupied_size(&self) -> Size {
        self.size.expand(self.margin)
    }
}

/// A run of consecutive boxes sharing one horizontal band.
///
/// `start..end` indexes into the pass's item slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    /// Index of the first box on the line.
    pub start: usize,
    /// One past the index of the last box on the line.
    pub end: usize,
    /// Sum of occupied widths.
    pub width: u32,
    /// Largest occupied height.
    pub height: u32,
    /// Boxes on the line that take space.
    pub spaced: usize,
}

impl Line {
    const fn open(start: usize) -> Self {
        Self {
            start,
            end: start,
            width: 0,
            height: 0,
            spaced: 0,
        }
    }

    /// Indices of the boxes on this line.
    #[inline]
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of boxes on this line, including those taking no space.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn push(&mut self, occupied: Size) {
        self.end += 1;
        self.width = self.width.saturating_add(occupied.width);
        self.height = self.height.max(occupied.height);
        self.spaced += 1;
    }
}

/// Split `items` into lines.
///
/// A box starts a new line when adding its occupied width to the current line
/// would exceed `available_width`, unless the current line holds no space-taking
/// box yet: a box wider than the container gets a line of its own and
/// overflows. With `available_width == None` nothing wraps.
///
/// Concatenating the returned lines yields `0..items.len()` in order.
pub fn partition_into_lines(
    items: &[FlowItem],
    available_width: Option<u32>,
    gone: GoneHandling,
) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line::open(0);

    for (index, item) in items.iter().enumerate() {
        if !gone.takes_space(item.visibility) {
            current.end = index + 1;
            continue;
        }

        let occupied = item.occupied_size();
        let overflows = available_width
            .is_some_and(|limit| current.width.saturating_add(occupied.width) > limit);
        if overflows && current.spaced > 0 {
            lines.push(current);
            current = Line::open(index);
        }
        current.push(occupied);
    }

    // The loop only closes a line when the next one starts.
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Widest line and summed line heights.
pub(crate) fn content_size(lines: &[Line]) -> Size {
    lines.iter().fold(Size::ZERO, |acc, line| Size {
        width: acc.width.max(line.width),
        height: acc.height.saturating_add(line.height),
    })
}

/// Wrapping flow configuration.
///
/// A `Flow` holds no per-pass state: every call to [`measure`](Self::measure)
/// or [`layout`](Self::layout) recomputes its lines from the items it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flow {
    #[serde(default)]
    padding: Sides,
    #[serde(default)]
    gone: GoneHandling,
}

impl Flow {
    /// Create a flow with no padding that collapses gone boxes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container padding.
    #[must_use]
    pub fn padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Set how gone boxes are treated.
    #[must_use]
    pub fn gone(mut self, gone: GoneHandling) -> Self {
        self.gone = gone;
        self
    }

    /// Container padding.
    #[must_use]
    pub const fn padding_sides(&self) -> Sides {
        self.padding
    }

    /// Gone-box handling.
    #[must_use]
    pub const fn gone_handling(&self) -> GoneHandling {
        self.gone
    }

    /// Parse a flow configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Encode the configuration as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The constraints children are measured under.
    #[must_use]
    pub const fn child_constraints(
        &self,
        width: Constraint,
        height: Constraint,
    ) -> (Constraint, Constraint) {
        (
            width.shrink(self.padding.horizontal_sum()),
            height.shrink(self.padding.vertical_sum()),
        )
    }

    /// Split `items` into lines for a container whose outer width limit is
    /// `container_width`.
    pub fn lines(&self, items: &[FlowItem], container_width: Option<u32>) -> Vec<Line> {
        let available =
            container_width.map(|width| width.saturating_sub(self.padding.horizontal_sum()));
        partition_into_lines(items, available, self.gone)
    }

    /// Compute the container size for `items` under the given constraints.
    ///
    /// An `Exact` axis reports the constraint; otherwise the axis reports the
    /// widest line (width) or the summed line heights (height), plus padding.
    /// `AtMost` wraps at its limit but is not clamped to it.
    pub fn measure(&self, items: &[FlowItem], width: Constraint, height: Constraint) -> Size {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "flow_measure",
            items = items.len(),
            width = ?width,
            height = ?height
        )
        .entered();

        let lines = self.lines(items, width.limit());
        let content = content_size(&lines).expand(self.padding);
        let size = Size::new(width.resolve(content.width), height.resolve(content.height));

        #[cfg(feature = "tracing")]
        tracing::trace!(
            lines = lines.len(),
            width = size.width,
            height = size.height,
            "flow measured"
        );

        size
    }

    /// Measure using a callback that resolves each item under the child
    /// constraints.
    ///
    /// Returns the container size together with the resolved items, ready for
    /// [`layout`](Self::layout).
    pub fn measure_with<F>(
        &self,
        count: usize,
        width: Constraint,
        height: Constraint,
        mut measurer: F,
    ) -> (Size, Vec<FlowItem>)
    where
        F: FnMut(usize, Constraint, Constraint) -> FlowItem,
    {
        let (child_width, child_height) = self.child_constraints(width, height);
        let items: Vec<FlowItem> = (0..count)
            .map(|index| measurer(index, child_width, child_height))
            .collect();
        let size = self.measure(&items, width, height);
        (size, items)
    }

    /// Place `items` in a container `container_width` wide.
    ///
    /// Lines are recomputed with the final width, so they match what
    /// [`measure`](Self::measure) saw for that width. Gone boxes get no
    /// rectangle and do not advance the line.
    pub fn layout(&self, items: &[FlowItem], container_width: u32) -> FlowLayout {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "flow_layout",
            items = items.len(),
            width = container_width
        )
        .entered();

        let lines = self.lines(items, Some(container_width));
        let mut rects = vec![None; items.len()];
        let mut top = self.padding.top;

        for line in &lines {
            #[cfg(feature = "tracing")]
            trace_line(
                line,
                container_width.saturating_sub(self.padding.horizontal_sum()),
            );

            let mut left = self.padding.left;
            for index in line.indices() {
                let item = &items[index];
                if item.visibility.is_gone() {
                    continue;
                }
                let x = left.saturating_add(item.margin.left);
                let y = top.saturating_add(item.margin.top);
                rects[index] = Some(Rect::from_origin_size(x, y, item.size));
                left = left.saturating_add(item.occupied_size().width);
            }
            top = top.saturating_add(line.height);
        }

        FlowLayout::new(container_width, lines, rects)
    }
}

#[cfg(feature = "tracing")]
fn trace_line(line: &Line, available: u32) {
    tracing::trace!(
        start = line.start,
        end = line.end,
        width = line.width,
        height = line.height,
        "line closed"
    );
    if line.spaced == 1 && line.width > available {
        tracing::debug!(
            index = line.start,
            width = line.width,
            available,
            "box overflows container width"
        );
    }
}
