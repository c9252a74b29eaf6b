#![forbid(unsafe_code)]

//! Child visibility.

use serde::{Deserialize, Serialize};

/// Display state of a child box.
///
/// Only [`Visibility::Gone`] changes what the flow does with a box. An
/// invisible box still reserves its space and receives a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Drawn and placed.
    #[default]
    Visible,
    /// Not drawn, but placed like a visible box.
    Invisible,
    /// Not displayed: never receives a rectangle.
    Gone,
}

impl Visibility {
    /// Whether the box is excluded from placement.
    #[inline]
    pub const fn is_gone(self) -> bool {
        matches!(self, Visibility::Gone)
    }
}
