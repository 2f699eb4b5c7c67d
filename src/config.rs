//! Project manifests: folders and resource descriptors in one TOML file
//!
//! ```toml
//! root = "assets"
//! types = ["image", "button"]   # optional, scopes the manager
//!
//! [folders]
//! image = "images"
//!
//! [resources.hero]
//! type = "image"
//! filename = "hero.png"
//! ```
//!
//! Relative paths are resolved against `root`, which is itself resolved
//! against the directory holding the manifest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::descriptor::DescriptorSet;
use crate::error::ResourceError;
use crate::source::{AssetSource, DiskSource};
use crate::template::TemplateManager;

/// Errors that can occur when loading a manifest
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse manifest TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// A parsed project manifest with all folders resolved
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    /// Directory every folder is relative to
    pub root: PathBuf,
    /// Source folder per type tag
    pub folders: BTreeMap<String, PathBuf>,
    /// Type tags the manager should serve; `None` for all
    pub types: Option<Vec<String>>,
    /// Resources in file order
    pub resources: DescriptorSet,
}

/// TOML structure for deserializing manifests
#[derive(Deserialize)]
struct TomlManifest {
    root: Option<PathBuf>,
    #[serde(default)]
    folders: BTreeMap<String, PathBuf>,
    types: Option<Vec<String>>,
    #[serde(default)]
    resources: toml::Table,
}

impl ProjectManifest {
    /// Load a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&content, base)
    }

    /// Load a manifest from a TOML string; paths stay relative to the working directory
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new(""))
    }

    fn parse(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let parsed: TomlManifest = toml::from_str(content)?;

        let root = match parsed.root {
            Some(root) => base.join(root),
            None => base.to_path_buf(),
        };
        let folders = parsed
            .folders
            .into_iter()
            .map(|(tag, folder)| {
                let folder = root.join(folder);
                (tag, folder)
            })
            .collect();

        Ok(Self {
            root,
            folders,
            types: parsed.types,
            resources: DescriptorSet::from_table(&parsed.resources)?,
        })
    }

    /// Build a filesystem-backed manager and load every resource as one batch
    pub fn build_manager(&self) -> Result<TemplateManager, ConfigError> {
        self.build_manager_with_source(DiskSource)
    }

    /// Build a manager over `source` and load every resource as one batch
    pub fn build_manager_with_source<S: AssetSource>(
        &self,
        source: S,
    ) -> Result<TemplateManager<S>, ConfigError> {
        let mut manager = TemplateManager::with_source(source);
        if let Some(types) = &self.types {
            manager = manager.with_types(types.iter().cloned());
        }
        manager.set_resource_folders(&self.folders)?;
        manager.load_resources(&self.resources)?;
        Ok(manager)
    }
}
