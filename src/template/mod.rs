//! Templates and their instances
//!
//! A [`TemplateManager`] loads descriptors into shared, read-only entries. Each
//! call to [`TemplateManager::create_resource_instance`] returns an
//! independent [`Instance`] that can be moved, resized, re-anchored, and drawn
//! without affecting the entry or any sibling.
//!
//! # Example
//!
//! ```text
//! [resources.start]
//! type = "button"
//! rect = { x = 540, y = 300, width = 200, height = 60 }
//! text = "Start"
//! action = 'scene_manager.switch("level_1")'
//! ```

mod instance;
mod manager;

pub use instance::{Animation, Graphic, Instance, InstanceId};
pub use manager::TemplateManager;
