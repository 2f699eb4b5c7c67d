//! Decoded resource payloads and store entries

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use toml::Table;

use crate::descriptor::Placement;
use crate::geometry::{Color, ColorSet, Rect, Size};

/// A decoded RGBA8 image
#[derive(Clone, PartialEq)]
pub struct ImageFrame {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes
    pub pixels: Arc<[u8]>,
}

impl ImageFrame {
    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }
}

impl fmt::Debug for ImageFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// A parsed font with its default rendering parameters
#[derive(Clone)]
pub struct FontData {
    pub font: Arc<fontdue::Font>,
    pub point_size: f32,
    pub color: Color,
}

impl FontData {
    /// Measure a single line of text at `point_size`
    pub fn measure(&self, text: &str, point_size: f32) -> Size {
        let width: f32 = text
            .chars()
            .map(|c| self.font.metrics(c, point_size).advance_width)
            .sum();
        let height = self
            .font
            .horizontal_line_metrics(point_size)
            .map(|m| m.new_line_size)
            .unwrap_or(point_size);
        Size::new(width.ceil() as i32, height.ceil() as i32)
    }
}

impl PartialEq for FontData {
    fn eq(&self, other: &Self) -> bool {
        self.font.file_hash() == other.font.file_hash()
            && self.point_size == other.point_size
            && self.color == other.color
    }
}

impl fmt::Debug for FontData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontData")
            .field("point_size", &self.point_size)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// Container format of an audio file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Ogg,
    Mp3,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "wav" => Some(Self::Wav),
            "ogg" => Some(Self::Ogg),
            "mp3" => Some(Self::Mp3),
            _ => None,
        }
    }
}

/// A music track streamed from disk at play time
#[derive(Debug, Clone, PartialEq)]
pub struct MusicTrack {
    pub path: PathBuf,
    pub format: AudioFormat,
}

/// A short sound held fully in memory
#[derive(Clone, PartialEq)]
pub struct SoundClip {
    pub format: AudioFormat,
    pub channels: u16,
    pub sample_rate: u32,
    /// Sample frames per channel, when the container header records it
    pub frames: Option<u64>,
    pub bytes: Arc<[u8]>,
}

impl SoundClip {
    /// Duration in milliseconds, when the frame count is known
    pub fn duration_ms(&self) -> Option<u64> {
        let frames = self.frames?;
        if self.sample_rate == 0 {
            return None;
        }
        Some(frames * 1000 / self.sample_rate as u64)
    }
}

impl fmt::Debug for SoundClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundClip")
            .field("format", &self.format)
            .field("channels", &self.channels)
            .field("sample_rate", &self.sample_rate)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

/// A pure-geometry resource (interface panels, buttons)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeData {
    pub rect: Rect,
    /// Collision area in screen coordinates; equal to `rect` unless configured
    pub hit_rect: Rect,
    pub colors: ColorSet,
    pub border_size: i32,
    pub border_radius: i32,
}

/// The decoded payload of a resource
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceData {
    Image(ImageFrame),
    ImageSequence {
        frames: Vec<ImageFrame>,
        /// Milliseconds each frame stays on screen
        frame_duration: u32,
    },
    Font(FontData),
    Music(MusicTrack),
    Sound(SoundClip),
    Shape(ShapeData),
}

impl ResourceData {
    /// Natural on-screen size, for payloads that have one
    pub fn natural_size(&self) -> Option<Size> {
        match self {
            Self::Image(frame) => Some(frame.size()),
            Self::ImageSequence { frames, .. } => frames.first().map(ImageFrame::size),
            Self::Shape(shape) => Some(shape.rect.size()),
            Self::Font(_) | Self::Music(_) | Self::Sound(_) => None,
        }
    }

    /// Short human-readable description
    pub fn summary(&self) -> String {
        match self {
            Self::Image(frame) => format!("{}x{} image", frame.width, frame.height),
            Self::ImageSequence {
                frames,
                frame_duration,
            } => format!("{} frames @ {}ms", frames.len(), frame_duration),
            Self::Font(font) => format!("font {}pt", font.point_size),
            Self::Music(track) => format!("{:?} stream", track.format),
            Self::Sound(clip) => match clip.duration_ms() {
                Some(ms) => format!(
                    "{:?} {}ch {}Hz {}ms",
                    clip.format, clip.channels, clip.sample_rate, ms
                ),
                None => format!("{:?} {}ch {}Hz", clip.format, clip.channels, clip.sample_rate),
            },
            Self::Shape(shape) => format!(
                "rect {},{} {}x{}",
                shape.rect.x, shape.rect.y, shape.rect.width, shape.rect.height
            ),
        }
    }
}

/// A loaded resource as held by the store
///
/// Entries are never mutated after insertion; instances copy what they need.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEntry {
    pub name: String,
    pub type_tag: String,
    /// Resolved source files, in declaration order (empty for geometry)
    pub paths: Vec<PathBuf>,
    /// All descriptor fields, merged in as given
    pub fields: Table,
    /// Initial instance placement parsed from the fields
    pub placement: Placement,
    pub data: ResourceData,
}
