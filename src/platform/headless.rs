//! In-memory collaborators
//!
//! `RecordingSurface` keeps the draw calls of the current frame; `clear()`
//! starts a new frame.

use glam::Vec2;

use super::{Color, ScoreSink, Surface, TextAlign};
use crate::sim::Aabb;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect {
        rect: Aabb,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        align: TextAlign,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls since the last clear (including the clear itself)
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of clears seen
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn rects(&self, color: Color) -> impl Iterator<Item = &Aabb> {
        self.calls.iter().filter_map(move |call| match call {
            DrawCall::Rect { rect, color: c } if *c == color => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
        self.frames += 1;
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        self.calls.push(DrawCall::Rect { rect, color });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, align: TextAlign, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            align,
            color,
        });
    }
}

/// Score sink holding the latest text
#[derive(Debug, Default)]
pub struct ScoreLine {
    text: String,
    updates: u64,
}

impl ScoreLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl ScoreSink for ScoreLine {
    fn set_text(&mut self, text: &str) {
        if self.text != text {
            log::trace!("{}", text);
        }
        self.text.clear();
        self.text.push_str(text);
        self.updates += 1;
    }
}
