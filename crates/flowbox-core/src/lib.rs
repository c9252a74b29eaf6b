#![forbid(unsafe_code)]

//! Core: geometry primitives shared by the flowbox layout crates.

pub mod geometry;

pub use geometry::{Rect, Sides, Size};
