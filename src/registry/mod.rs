//! Type registry: maps resource type tags to loading strategies
//!
//! Each registered type pairs a path strategy (how source files are found and
//! validated) with a decode function (how the files, or the descriptor's own
//! geometry, become a [`ResourceData`](crate::resource::ResourceData)).
//!
//! # Example
//!
//! ```text
//! [resources.hero]
//! type = "image"            # SingleFile, .png/.jpg/.jpeg/.bmp
//! filename = "hero.png"
//!
//! [resources.ok_button]
//! type = "button"           # NoFile, geometry only
//! rect = { x = 10, y = 20, width = 100, height = 40 }
//! ```

pub mod decode;
mod types;

pub use decode::{DecodeFn, DecodeInput};
pub use types::{kinds, optional_rect_field, rect_field, PathStrategy, TypeEntry, TypeRegistry};
