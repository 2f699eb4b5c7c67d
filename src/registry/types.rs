//! Registry entries and the path strategies that feed them

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use super::decode::{self, DecodeFn, DecodeInput};
use crate::descriptor::{as_number, to_px, Placement, ResourceDescriptor};
use crate::error::ResourceError;
use crate::geometry::Rect;
use crate::resource::ResourceEntry;
use crate::source::AssetSource;
use crate::validate::{validate_file, validate_files};

/// Built-in type tags
pub mod kinds {
    pub const MUSIC: &str = "music";
    pub const SOUND: &str = "sound";
    pub const FONT: &str = "font";
    pub const IMAGE: &str = "image";
    pub const IMAGE_SEQUENCE: &str = "image_sequence";
    pub const INTERFACE: &str = "interface";
    pub const BUTTON: &str = "button";
}

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".bmp"];
const FONT_EXTENSIONS: &[&str] = &[".ttf", ".otf"];
const MUSIC_EXTENSIONS: &[&str] = &[".mp3", ".ogg", ".wav"];
const SOUND_EXTENSIONS: &[&str] = &[".wav", ".ogg"];

const RECT_FIELDS: [&str; 4] = ["x", "y", "width", "height"];

/// How a descriptor's source files are located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStrategy {
    /// One `filename` joined onto the type's folder
    SingleFile,
    /// An ordered `files = [{ filename }, ...]` list
    MultiFile,
    /// No files; the descriptor carries `rect = { x, y, width, height }`
    NoFile,
}

/// Everything needed to load one resource type
#[derive(Clone)]
pub struct TypeEntry {
    pub strategy: PathStrategy,
    pub decode: DecodeFn,
    /// Dotted, case-sensitive extensions (`.png`)
    pub extensions: Vec<String>,
    /// Unset until configured; file-based loads require it
    pub folder: Option<PathBuf>,
}

impl std::fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry")
            .field("strategy", &self.strategy)
            .field("extensions", &self.extensions)
            .field("folder", &self.folder)
            .finish_non_exhaustive()
    }
}

impl TypeEntry {
    pub fn new(strategy: PathStrategy, decode: DecodeFn) -> Self {
        Self {
            strategy,
            decode,
            extensions: Vec::new(),
            folder: None,
        }
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    fn folder_for(&self, type_tag: &str) -> Result<&Path, ResourceError> {
        self.folder
            .as_deref()
            .ok_or_else(|| ResourceError::folder_not_configured(type_tag))
    }

    /// Resolve and validate the descriptor's source files for this strategy
    pub fn resolve_paths(
        &self,
        descriptor: &ResourceDescriptor,
        source: &dyn AssetSource,
    ) -> Result<Vec<PathBuf>, ResourceError> {
        let tag = descriptor.type_tag.as_str();
        let name = descriptor.name.as_str();
        let extensions: Vec<&str> = self.extensions.iter().map(String::as_str).collect();

        match self.strategy {
            PathStrategy::SingleFile => {
                let filename = descriptor
                    .filename()?
                    .ok_or_else(|| ResourceError::missing_field(tag, name, "filename"))?;
                let path = self.folder_for(tag)?.join(filename);
                validate_file(source, &path, tag, name, &extensions)?;
                Ok(vec![path])
            }
            PathStrategy::MultiFile => {
                let files = descriptor
                    .files()?
                    .filter(|files| !files.is_empty())
                    .ok_or_else(|| ResourceError::missing_field(tag, name, "files"))?;
                let folder = self.folder_for(tag)?;
                let paths: Vec<PathBuf> = files.iter().map(|f| folder.join(f)).collect();
                validate_files(source, &paths, tag, name, &extensions)?;
                Ok(paths)
            }
            PathStrategy::NoFile => {
                rect_field(descriptor)?;
                Ok(Vec::new())
            }
        }
    }
}

/// Read and check the `rect` table of a geometry descriptor
///
/// All four of `x, y, width, height` must be present and numeric; every
/// offending field is reported.
pub fn rect_field(descriptor: &ResourceDescriptor) -> Result<Rect, ResourceError> {
    let table = match descriptor.get("rect") {
        Some(Value::Table(t)) => Some(t),
        _ => None,
    };
    parse_rect(descriptor, "rect", table)
}

/// Like [`rect_field`] for an optional table such as `hit_rect`
pub fn optional_rect_field(
    descriptor: &ResourceDescriptor,
    key: &str,
) -> Result<Option<Rect>, ResourceError> {
    match descriptor.get(key) {
        None => Ok(None),
        Some(Value::Table(t)) => parse_rect(descriptor, key, Some(t)).map(Some),
        Some(_) => parse_rect(descriptor, key, None).map(Some),
    }
}

fn parse_rect(
    descriptor: &ResourceDescriptor,
    key: &str,
    table: Option<&Table>,
) -> Result<Rect, ResourceError> {
    let values: Vec<Option<f64>> = RECT_FIELDS
        .iter()
        .map(|field| table.and_then(|t| t.get(*field)).and_then(as_number))
        .collect();

    let bad: Vec<&str> = RECT_FIELDS
        .iter()
        .zip(&values)
        .filter(|(_, v)| v.is_none())
        .map(|(field, _)| *field)
        .collect();
    if !bad.is_empty() {
        return Err(ResourceError::invalid_geometry(
            &descriptor.type_tag,
            &descriptor.name,
            key,
            &bad,
        ));
    }

    let px: Vec<Option<i32>> = values.into_iter().flatten().map(to_px).collect();
    let out_of_range: Vec<&str> = RECT_FIELDS
        .iter()
        .zip(&px)
        .filter(|(_, v)| v.is_none())
        .map(|(field, _)| *field)
        .collect();
    if !out_of_range.is_empty() {
        return Err(ResourceError::geometry_out_of_range(
            &descriptor.type_tag,
            &descriptor.name,
            &out_of_range,
        ));
    }

    let px: Vec<i32> = px.into_iter().flatten().collect();
    Ok(Rect::new(px[0], px[1], px[2], px[3]))
}

/// Table of known resource types
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, TypeEntry>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in type; folders start unset
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            kinds::IMAGE,
            TypeEntry::new(PathStrategy::SingleFile, decode::decode_image)
                .with_extensions(IMAGE_EXTENSIONS),
        );
        registry.register(
            kinds::IMAGE_SEQUENCE,
            TypeEntry::new(PathStrategy::MultiFile, decode::decode_image_sequence)
                .with_extensions(IMAGE_EXTENSIONS),
        );
        registry.register(
            kinds::FONT,
            TypeEntry::new(PathStrategy::SingleFile, decode::decode_font)
                .with_extensions(FONT_EXTENSIONS),
        );
        registry.register(
            kinds::MUSIC,
            TypeEntry::new(PathStrategy::SingleFile, decode::decode_music)
                .with_extensions(MUSIC_EXTENSIONS),
        );
        registry.register(
            kinds::SOUND,
            TypeEntry::new(PathStrategy::SingleFile, decode::decode_sound)
                .with_extensions(SOUND_EXTENSIONS),
        );
        registry.register(
            kinds::INTERFACE,
            TypeEntry::new(PathStrategy::NoFile, decode::decode_interface),
        );
        registry.register(
            kinds::BUTTON,
            TypeEntry::new(PathStrategy::NoFile, decode::decode_button),
        );
        registry
    }

    /// Add or replace a type
    pub fn register(&mut self, type_tag: impl Into<String>, entry: TypeEntry) {
        self.entries.insert(type_tag.into(), entry);
    }

    /// Look up the entry for a type tag
    pub fn resolve(&self, type_tag: &str) -> Result<&TypeEntry, ResourceError> {
        self.entries.get(type_tag).ok_or_else(|| {
            ResourceError::configuration(format!("unknown resource type '{}'", type_tag))
        })
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.entries.contains_key(type_tag)
    }

    /// All registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn folder(&self, type_tag: &str) -> Option<&Path> {
        self.entries.get(type_tag)?.folder.as_deref()
    }

    /// Point a type at its source folder
    pub fn set_folder(
        &mut self,
        type_tag: &str,
        folder: impl Into<PathBuf>,
    ) -> Result<(), ResourceError> {
        let entry = self
            .entries
            .get_mut(type_tag)
            .ok_or_else(|| ResourceError::unknown_folder_type(type_tag))?;
        entry.folder = Some(folder.into());
        Ok(())
    }

    /// Set several folders; stops at the first unknown type
    pub fn set_folders<I, K, P>(&mut self, folders: I) -> Result<(), ResourceError>
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<PathBuf>,
    {
        for (tag, folder) in folders {
            self.set_folder(tag.as_ref(), folder)?;
        }
        Ok(())
    }

    /// Validate and decode one descriptor into a store entry
    pub fn load(
        &self,
        descriptor: &ResourceDescriptor,
        source: &dyn AssetSource,
    ) -> Result<ResourceEntry, ResourceError> {
        let entry = self
            .entries
            .get(&descriptor.type_tag)
            .ok_or_else(|| ResourceError::unknown_type(&descriptor.type_tag, &descriptor.name))?;

        let paths = entry.resolve_paths(descriptor, source)?;
        let placement = Placement::from_descriptor(descriptor)?;
        let data = (entry.decode)(&DecodeInput {
            descriptor,
            paths: &paths,
            source,
        })?;

        debug!(
            name = %descriptor.name,
            type_tag = %descriptor.type_tag,
            files = paths.len(),
            "decoded resource"
        );

        Ok(ResourceEntry {
            name: descriptor.name.clone(),
            type_tag: descriptor.type_tag.clone(),
            paths,
            fields: descriptor.fields.clone(),
            placement,
            data,
        })
    }
}
