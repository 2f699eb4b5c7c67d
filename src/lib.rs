//! Resource Forge - resource registration, validation, and instancing for 2D games
//!
//! Resources are declared as named descriptors. A [`TemplateManager`] validates
//! their source files (existence first, then format), decodes them through the
//! [`TypeRegistry`], and stores the results. Instances created from a stored
//! resource are independent copies that can be moved, re-anchored, animated,
//! and drawn onto any [`Canvas`].
//!
//! # Example
//!
//! ```rust
//! use resource_forge::{DescriptorSet, TemplateManager, Align, Point, Rect};
//!
//! let resources = DescriptorSet::from_toml_str(r#"
//!     [ok_button]
//!     type = "button"
//!     rect = { x = 10, y = 20, width = 100, height = 40 }
//! "#).unwrap();
//!
//! let mut manager = TemplateManager::new();
//! manager.load_resources(&resources).unwrap();
//!
//! let mut button = manager.create_resource_instance("ok_button").unwrap();
//! assert_eq!(button.rect(), Rect::new(10, 20, 100, 40));
//!
//! button.set_position(Point::new(200, 100));
//! button.set_align(Align::SouthEast);
//! assert_eq!(button.rect(), Rect::new(100, 60, 100, 40));
//! ```

pub mod command;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod geometry;
pub mod registry;
pub mod render;
pub mod resource;
pub mod source;
pub mod store;
pub mod template;
pub mod validate;

#[cfg(test)]
mod fixtures;

pub use command::{parse_action, ActionArg, ActionCall, CommandTable};
pub use config::{ConfigError, ProjectManifest};
pub use descriptor::{DescriptorSet, Placement, ResourceDescriptor};
pub use error::ResourceError;
pub use geometry::{Align, Color, ColorSet, Point, Rect, Size};
pub use registry::{kinds, PathStrategy, TypeEntry, TypeRegistry};
pub use render::{Canvas, CommandCanvas, DrawCommand};
pub use resource::{ResourceData, ResourceEntry};
pub use source::{AssetSource, DiskSource};
pub use store::ResourceStore;
pub use template::{Instance, InstanceId, TemplateManager};
pub use validate::{validate_file, validate_files};

use std::path::Path;

/// Load a manifest file and build a filesystem-backed manager from it
pub fn load_manifest(path: impl AsRef<Path>) -> Result<TemplateManager, ConfigError> {
    ProjectManifest::from_file(path.as_ref())?.build_manager()
}
