//! Property-based invariant tests for the flow passes.
//!
//! 1. No box is dropped: concatenated lines reproduce the input order.
//! 2. Measure and layout are deterministic.
//! 3. Boxes sharing a line never overlap and respect margins.
//! 4. Lines with two or more boxes fit the container width.
//! 5. Unconstrained measured height equals the summed placement line heights.
//! 6. A box wider than the container sits at its own margin origin.
//! 7. Gone boxes never receive a rectangle.

use flowbox_layout::debug::FlowSnapshot;
use flowbox_layout::{
    Constraint, Flow, FlowItem, GoneHandling, Sides, Visibility, partition_into_lines,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn visibility_strategy() -> impl Strategy<Value = Visibility> {
    prop_oneof![
        6 => Just(Visibility::Visible),
        1 => Just(Visibility::Invisible),
        1 => Just(Visibility::Gone),
    ]
}

fn item_strategy() -> impl Strategy<Value = FlowItem> {
    (
        0u32..=400,
        0u32..=200,
        (0u32..=20, 0u32..=20, 0u32..=20, 0u32..=20),
        visibility_strategy(),
    )
        .prop_map(|(w, h, (t, r, b, l), visibility)| {
            FlowItem::new(w, h)
                .margin(Sides::new(t, r, b, l))
                .visibility(visibility)
        })
}

fn items_strategy() -> impl Strategy<Value = Vec<FlowItem>> {
    prop::collection::vec(item_strategy(), 0..40)
}

fn gone_strategy() -> impl Strategy<Value = GoneHandling> {
    prop_oneof![Just(GoneHandling::Collapse), Just(GoneHandling::ReserveSpace)]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. No-drop
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lines_cover_input_in_order(
        items in items_strategy(),
        width in 0u32..=1_000,
        gone in gone_strategy(),
    ) {
        let lines = partition_into_lines(&items, Some(width), gone);
        let order: Vec<usize> = lines.iter().flat_map(|line| line.indices()).collect();
        prop_assert_eq!(order, (0..items.len()).collect::<Vec<_>>());
        prop_assert!(lines.iter().all(|line| !line.is_empty()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn passes_are_idempotent(
        items in items_strategy(),
        width in 0u32..=1_000,
        gone in gone_strategy(),
    ) {
        let flow = Flow::new().gone(gone);
        let size_a = flow.measure(&items, Constraint::Exact(width), Constraint::Unbounded);
        let layout_a = flow.layout(&items, size_a.width);
        let size_b = flow.measure(&items, Constraint::Exact(width), Constraint::Unbounded);
        let layout_b = flow.layout(&items, size_b.width);
        prop_assert_eq!(size_a, size_b);
        prop_assert_eq!(layout_a, layout_b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3 + 4. Width bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn neighbours_respect_margins(items in items_strategy(), width in 0u32..=1_000) {
        let layout = Flow::new().layout(&items, width);
        for line in layout.lines() {
            let placed: Vec<usize> = line
                .indices()
                .filter(|&index| layout.rect(index).is_some())
                .collect();
            for pair in placed.windows(2) {
                let (first, second) = (pair[0], pair[1]);
                let a = layout.rect(first).unwrap();
                let b = layout.rect(second).unwrap();
                prop_assert!(
                    b.x >= a.x + a.width + items[first].margin.right + items[second].margin.left,
                    "box {} at {:?} crowds box {} at {:?}",
                    second, b, first, a
                );
            }
        }
    }

    #[test]
    fn shared_lines_fit_width(
        items in items_strategy(),
        width in 0u32..=1_000,
        gone in gone_strategy(),
    ) {
        let layout = Flow::new().gone(gone).layout(&items, width);
        for line in layout.lines() {
            if line.spaced >= 2 {
                prop_assert!(line.width <= width, "line {:?} overflows {}", line, width);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Height additivity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn measured_height_matches_layout_lines(
        items in items_strategy(),
        width in 0u32..=1_000,
        gone in gone_strategy(),
    ) {
        let flow = Flow::new().gone(gone);
        let size = flow.measure(&items, Constraint::AtMost(width), Constraint::Unbounded);
        let layout = flow.layout(&items, width);
        let summed: u32 = layout.line_heights().sum();
        prop_assert_eq!(size.height, summed);
        prop_assert_eq!(size.width, layout.content_size().width);
        let measured_lines = flow.lines(&items, Some(width));
        prop_assert_eq!(layout.lines(), measured_lines.as_slice());
        prop_assert!(FlowSnapshot::capture(&layout).validate().is_ok());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Oversized box
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn oversized_box_sits_at_margin_origin(
        prefix in prop::collection::vec(item_strategy(), 0..5),
        extra in 1u32..=500,
        width in 0u32..=300,
        margin in (0u32..=20, 0u32..=20),
    ) {
        // A visible prefix always closes its line before the wide box.
        let mut items: Vec<FlowItem> = prefix
            .into_iter()
            .map(|item| item.visibility(Visibility::Visible))
            .collect();
        let big = FlowItem::new(width + extra, 10).margin(Sides::new(margin.0, 0, 0, margin.1));
        items.push(big);
        let index = items.len() - 1;

        let layout = Flow::new().layout(&items, width);
        let line = layout.line_of(index).unwrap();
        let placed_line = layout.lines()[line];
        let top: u32 = layout.line_heights().take(line).sum();
        let rect = layout.rect(index).unwrap();

        prop_assert_eq!(placed_line.start, index);
        prop_assert_eq!(placed_line.end, index + 1);
        prop_assert_eq!((rect.x, rect.y), (margin.1, top + margin.0));
        prop_assert_eq!(line, layout.line_count() - 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Gone boxes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn gone_boxes_have_no_rect(
        items in items_strategy(),
        width in 0u32..=1_000,
        gone in gone_strategy(),
    ) {
        let layout = Flow::new().gone(gone).layout(&items, width);
        for (index, item) in items.iter().enumerate() {
            prop_assert_eq!(layout.rect(index).is_none(), item.visibility.is_gone());
        }
    }
}
