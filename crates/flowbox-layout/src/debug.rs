#![forbid(unsafe_code)]

//! Layout snapshots for debugging and regression fixtures.
//!
//! A [`FlowSnapshot`] captures everything a layout pass decided: the lines,
//! their heights, and each box's rectangle. Snapshots serialize to JSON (one
//! object per line for JSONL logs) and can be re-checked with
//! [`FlowSnapshot::validate`].

use std::fmt;

use flowbox_core::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::flow::Line;
use crate::layout::FlowLayout;

/// Current snapshot schema version.
pub const FLOW_SNAPSHOT_SCHEMA_VERSION: u16 = 1;

/// Serializable record of one layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub schema_version: u16,
    /// Width the boxes were placed in.
    pub container_width: u32,
    /// Widest line and summed line heights.
    pub content: Size,
    pub lines: Vec<Line>,
    /// One slot per box; `None` for boxes that were not placed.
    pub rects: Vec<Option<Rect>>,
}

impl FlowSnapshot {
    /// Capture a layout result.
    #[must_use]
    pub fn capture(layout: &FlowLayout) -> Self {
        Self {
            schema_version: FLOW_SNAPSHOT_SCHEMA_VERSION,
            container_width: layout.container_width(),
            content: layout.content_size(),
            lines: layout.lines().to_vec(),
            rects: layout.rects().to_vec(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Json)
    }

    /// Single-line JSON, suitable for appending to a JSONL log.
    pub fn to_jsonl_line(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Json)
    }

    /// Parse and validate a snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json).map_err(SnapshotError::Json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the structural invariants of a layout pass.
    ///
    /// - lines are non-empty, contiguous, in order, and cover every box
    /// - the recorded content height is the sum of the line heights
    /// - the recorded content width is the widest line
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.schema_version != FLOW_SNAPSHOT_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedSchemaVersion {
                version: self.schema_version,
                expected: FLOW_SNAPSHOT_SCHEMA_VERSION,
            });
        }

        let mut next = 0;
        for (index, line) in self.lines.iter().enumerate() {
            if line.start != next {
                return Err(SnapshotError::LineGap {
                    line: index,
                    expected_start: next,
                    found_start: line.start,
                });
            }
            if line.end <= line.start {
                return Err(SnapshotError::EmptyLine { line: index });
            }
            next = line.end;
        }
        if next != self.rects.len() {
            return Err(SnapshotError::Coverage {
                covered: next,
                boxes: self.rects.len(),
            });
        }

        let height: u64 = self.lines.iter().map(|line| u64::from(line.height)).sum();
        if height != u64::from(self.content.height) {
            return Err(SnapshotError::HeightMismatch {
                recorded: self.content.height,
                summed: height,
            });
        }

        let width = self.lines.iter().map(|line| line.width).max().unwrap_or(0);
        if width != self.content.width {
            return Err(SnapshotError::WidthMismatch {
                recorded: self.content.width,
                widest: width,
            });
        }

        Ok(())
    }
}

impl From<&FlowLayout> for FlowSnapshot {
    fn from(layout: &FlowLayout) -> Self {
        Self::capture(layout)
    }
}

/// Reasons a snapshot is rejected.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    UnsupportedSchemaVersion { version: u16, expected: u16 },
    /// A line does not start where the previous one ended.
    LineGap {
        line: usize,
        expected_start: usize,
        found_start: usize,
    },
    EmptyLine { line: usize },
    /// The lines do not cover every box.
    Coverage { covered: usize, boxes: usize },
    HeightMismatch { recorded: u32, summed: u64 },
    WidthMismatch { recorded: u32, widest: u32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "flow snapshot json error: {err}"),
            Self::UnsupportedSchemaVersion { version, expected } => write!(
                f,
                "unsupported flow snapshot schema version {version} (expected {expected})"
            ),
            Self::LineGap {
                line,
                expected_start,
                found_start,
            } => write!(
                f,
                "line {line} starts at box {found_start}, expected box {expected_start}"
            ),
            Self::EmptyLine { line } => write!(f, "line {line} holds no boxes"),
            Self::Coverage { covered, boxes } => {
                write!(f, "lines cover {covered} of {boxes} boxes")
            }
            Self::HeightMismatch { recorded, summed } => write!(
                f,
                "content height {recorded} does not match summed line heights {summed}"
            ),
            Self::WidthMismatch { recorded, widest } => write!(
                f,
                "content width {recorded} does not match widest line {widest}"
            ),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Json(err) = self {
            return Some(err);
        }
        None
    }
}
