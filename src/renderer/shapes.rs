//! Draw primitives and the frame they are collected into

use glam::Vec2;

/// Linear RGBA
pub type Color = [f32; 4];

pub const BACKGROUND: Color = [0.06, 0.06, 0.09, 1.0];
pub const SEPARATOR: Color = [0.35, 0.35, 0.4, 1.0];
pub const BAND: Color = [1.0, 1.0, 1.0, 0.25];
pub const TILE: Color = [0.1, 0.1, 0.12, 1.0];
pub const TILE_EDGE: Color = [0.85, 0.85, 0.9, 1.0];
pub const FLASH: Color = [0.4, 0.8, 1.0, 0.6];
pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
pub const HIGHLIGHT: Color = [1.0, 0.85, 0.2, 1.0];
pub const DIM: Color = [0.0, 0.0, 0.0, 0.6];

/// Scale a color's alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Textures the sink may draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    MenuBackground,
    Star,
}

/// One drawable primitive, in field pixels (origin top-left, y down)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    /// Rectangle outline
    Frame {
        min: Vec2,
        size: Vec2,
        thickness: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        size: f32,
        align: Align,
        text: String,
        color: Color,
    },
    Sprite {
        sprite: Sprite,
        min: Vec2,
        size: Vec2,
    },
}

/// Ordered draw list for one tick; later commands paint over earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCmd>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCmd::Rect { min, size, color });
    }

    pub fn outline(&mut self, min: Vec2, size: Vec2, thickness: f32, color: Color) {
        self.commands.push(DrawCmd::Frame {
            min,
            size,
            thickness,
            color,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn text(&mut self, pos: Vec2, size: f32, align: Align, text: impl Into<String>, color: Color) {
        self.commands.push(DrawCmd::Text {
            pos,
            size,
            align,
            text: text.into(),
            color,
        });
    }

    pub fn sprite(&mut self, sprite: Sprite, min: Vec2, size: Vec2) {
        self.commands.push(DrawCmd::Sprite { sprite, min, size });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn count_sprites(&self, sprite: Sprite) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Sprite { sprite: s, .. } if *s == sprite))
            .count()
    }
}
