//! Type-specific decoders
//!
//! Decoders are the only producers of [`ResourceData`]. They depend only on the
//! descriptor and the bytes behind its resolved paths, so decoding the same
//! descriptor twice yields equal payloads.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::descriptor::ResourceDescriptor;
use crate::error::ResourceError;
use crate::geometry::{Color, ColorSet};
use crate::resource::{
    AudioFormat, FontData, ImageFrame, MusicTrack, ResourceData, ShapeData, SoundClip,
};
use crate::source::AssetSource;

use super::types::{optional_rect_field, rect_field};

/// Default frame duration for image sequences, in milliseconds
pub const DEFAULT_FRAME_DURATION: u32 = 100;

/// Default font point size
pub const DEFAULT_FONT_SIZE: f32 = 24.0;

/// Signature shared by every decoder in the registry
pub type DecodeFn = fn(&DecodeInput<'_>) -> Result<ResourceData, ResourceError>;

/// What a decoder gets to work with
pub struct DecodeInput<'a> {
    pub descriptor: &'a ResourceDescriptor,
    /// Validated source files, in declaration order
    pub paths: &'a [PathBuf],
    pub source: &'a dyn AssetSource,
}

impl DecodeInput<'_> {
    /// Read a validated file
    pub fn read(&self, path: &Path) -> Result<Vec<u8>, ResourceError> {
        self.source.read(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The first (and for single-file types, only) path
    pub fn first_path(&self) -> Result<&Path, ResourceError> {
        self.paths.first().map(PathBuf::as_path).ok_or_else(|| {
            ResourceError::missing_field(
                &self.descriptor.type_tag,
                &self.descriptor.name,
                "filename",
            )
        })
    }

    /// Build a decode error attributed to `path`
    pub fn error(&self, path: &Path, message: impl ToString) -> ResourceError {
        ResourceError::Decode {
            resource_type: self.descriptor.type_tag.clone(),
            name: self.descriptor.name.clone(),
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    fn read_image(&self, path: &Path) -> Result<ImageFrame, ResourceError> {
        let bytes = self.read(path)?;
        let rgba = image::load_from_memory(&bytes)
            .map_err(|e| self.error(path, e))?
            .to_rgba8();
        Ok(ImageFrame {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw().into(),
        })
    }
}

/// Decode a single image at its natural size
pub fn decode_image(input: &DecodeInput<'_>) -> Result<ResourceData, ResourceError> {
    let path = input.first_path()?;
    Ok(ResourceData::Image(input.read_image(path)?))
}

/// Decode every frame of an image sequence, preserving declaration order
pub fn decode_image_sequence(input: &DecodeInput<'_>) -> Result<ResourceData, ResourceError> {
    let frames = input
        .paths
        .iter()
        .map(|path| input.read_image(path))
        .collect::<Result<Vec<_>, _>>()?;

    let frame_duration = match input.descriptor.number("frame_duration")? {
        None => DEFAULT_FRAME_DURATION,
        Some(ms) if ms >= 1.0 => ms.round() as u32,
        Some(_) => {
            return Err(ResourceError::configuration(format!(
                "image_sequence '{}': frame_duration must be at least 1ms",
                input.descriptor.name
            )))
        }
    };

    Ok(ResourceData::ImageSequence {
        frames,
        frame_duration,
    })
}

/// Parse a font file; `size` sets the point size and `color` the text color
pub fn decode_font(input: &DecodeInput<'_>) -> Result<ResourceData, ResourceError> {
    let path = input.first_path()?;
    let bytes = input.read(path)?;
    let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| input.error(path, e))?;

    let point_size = match input.descriptor.number("size")? {
        None => DEFAULT_FONT_SIZE,
        Some(size) if size > 0.0 => size as f32,
        Some(_) => {
            return Err(ResourceError::configuration(format!(
                "font '{}': size must be positive",
                input.descriptor.name
            )))
        }
    };

    Ok(ResourceData::Font(FontData {
        font: Arc::new(font),
        point_size,
        color: input.descriptor.color("color")?.unwrap_or(Color::WHITE),
    }))
}

/// Music is streamed at play time; only the path and container are recorded
pub fn decode_music(input: &DecodeInput<'_>) -> Result<ResourceData, ResourceError> {
    let path = input.first_path()?;
    let format = audio_format(path).ok_or_else(|| input.error(path, "unknown audio container"))?;
    Ok(ResourceData::Music(MusicTrack {
        path: path.to_path_buf(),
        format,
    }))
}

/// Load a sound into memory and read its header
pub fn decode_sound(input: &DecodeInput<'_>) -> Result<ResourceData, ResourceError> {
    let path = input.first_path()?;
    let bytes = input.read(path)?;

    let clip = match audio_format(path) {
        Some(AudioFormat::Wav) => {
            let reader = hound::WavReader::new(Cursor::new(&bytes[..]))
                .map_err(|e| input.error(path, e))?;
            let spec = reader.spec();
            SoundClip {
                format: AudioFormat::Wav,
                channels: spec.channels,
                sample_rate: spec.sample_rate,
                frames: Some(reader.duration() as u64),
                bytes: Arc::from(&bytes[..]),
            }
        }
        Some(AudioFormat::Ogg) => {
            let reader = lewton::inside_ogg::OggStreamReader::new(Cursor::new(&bytes[..]))
                .map_err(|e| input.error(path, e))?;
            SoundClip {
                format: AudioFormat::Ogg,
                channels: reader.ident_hdr.audio_channels as u16,
                sample_rate: reader.ident_hdr.audio_sample_rate,
                frames: None,
                bytes: Arc::from(&bytes[..]),
            }
        }
        _ => return Err(input.error(path, "sounds must be WAV or Ogg Vorbis")),
    };

    Ok(ResourceData::Sound(clip))
}

/// A static panel: `color = { default, border }`, `border_size`, and an
/// optional `hit_rect` collision area
pub fn decode_interface(input: &DecodeInput<'_>) -> Result<ResourceData, ResourceError> {
    let desc = input.descriptor;
    let fill = desc.nested_color("color", "default")?.unwrap_or(Color::BLACK);
    let rect = rect_field(desc)?;
    Ok(ResourceData::Shape(ShapeData {
        rect,
        hit_rect: optional_rect_field(desc, "hit_rect")?.unwrap_or(rect),
        colors: ColorSet {
            active: fill,
            inactive: fill,
            border: desc.nested_color("color", "border")?.unwrap_or(Color::WHITE),
        },
        border_size: desc.pixels("border_size")?.unwrap_or(0),
        border_radius: desc.pixels("border_radius")?.unwrap_or(0),
    }))
}

/// A clickable shape: `color = { active, inactive, border }`
pub fn decode_button(input: &DecodeInput<'_>) -> Result<ResourceData, ResourceError> {
    let desc = input.descriptor;
    let defaults = ColorSet::default();
    let rect = rect_field(desc)?;
    Ok(ResourceData::Shape(ShapeData {
        rect,
        hit_rect: optional_rect_field(desc, "hit_rect")?.unwrap_or(rect),
        colors: ColorSet {
            active: desc.nested_color("color", "active")?.unwrap_or(defaults.active),
            inactive: desc.nested_color("color", "inactive")?.unwrap_or(defaults.inactive),
            border: desc.nested_color("color", "border")?.unwrap_or(defaults.border),
        },
        border_size: desc.pixels("border_size")?.unwrap_or(0),
        border_radius: desc.pixels("border_radius")?.unwrap_or(0),
    }))
}

fn audio_format(path: &Path) -> Option<AudioFormat> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(AudioFormat::from_extension)
}
