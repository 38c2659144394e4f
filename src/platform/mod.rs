//! Platform abstraction layer
//!
//! The frame driver talks to the outside world only through these traits:
//! - [`Surface`]: clear and draw filled rectangles and text
//! - [`ScoreSink`]: the score readout
//!
//! `headless` records calls for tests and the native binary; `web` draws to a
//! browser canvas.

pub mod headless;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::sim::Aabb;

/// Fill colors used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Vehicle,
    Obstacle,
    Caption,
}

impl Color {
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::Vehicle => "blue",
            Color::Obstacle => "red",
            Color::Caption => "black",
        }
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// 2D drawing target
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Aabb, color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, align: TextAlign, color: Color);
}

/// Score readout
pub trait ScoreSink {
    fn set_text(&mut self, text: &str);
}
