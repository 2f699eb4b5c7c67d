//! Draw target interface for instances
//!
//! The engine's window layer implements [`Canvas`]; instances draw themselves
//! onto it from their own fields. [`CommandCanvas`] records the calls instead,
//! which is useful for headless runs and tests.

use crate::geometry::{Color, Rect};
use crate::resource::{FontData, ImageFrame};

/// Something instances can draw onto
pub trait Canvas {
    /// Draw an image scaled into `dest`
    fn blit(&mut self, image: &ImageFrame, dest: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color, radius: i32);

    /// Outline a rectangle; `width` of zero draws nothing
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32, radius: i32);

    fn text(&mut self, text: &str, font: &FontData, point_size: f32, color: Color, dest: Rect);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Blit {
        source_size: (u32, u32),
        dest: Rect,
    },
    Fill {
        rect: Rect,
        color: Color,
        radius: i32,
    },
    Stroke {
        rect: Rect,
        color: Color,
        width: i32,
        radius: i32,
    },
    Text {
        text: String,
        point_size: f32,
        color: Color,
        dest: Rect,
    },
}

/// Canvas that records draw calls in order
#[derive(Debug, Default)]
pub struct CommandCanvas {
    pub commands: Vec<DrawCommand>,
}

impl CommandCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded commands, leaving the canvas empty
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for CommandCanvas {
    fn blit(&mut self, image: &ImageFrame, dest: Rect) {
        self.commands.push(DrawCommand::Blit {
            source_size: (image.width, image.height),
            dest,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, radius: i32) {
        self.commands.push(DrawCommand::Fill {
            rect,
            color,
            radius,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32, radius: i32) {
        if width <= 0 {
            return;
        }
        self.commands.push(DrawCommand::Stroke {
            rect,
            color,
            width,
            radius,
        });
    }

    fn text(&mut self, text: &str, _font: &FontData, point_size: f32, color: Color, dest: Rect) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            point_size,
            color,
            dest,
        });
    }
}
