//! Error types for resource loading and instancing

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::MAX_COORDINATE;

/// Errors that can occur while registering, loading, or instancing resources
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Declared source path does not exist
    #[error("{resource_type} '{name}' not found at '{}'", path.display())]
    NotFound {
        resource_type: String,
        name: String,
        path: PathBuf,
    },

    /// File extension is not in the type's allowed set
    #[error(
        "{resource_type} '{name}' has an unsupported format: '{}' (allowed: {})",
        path.display(),
        allowed.join(", ")
    )]
    InvalidFormat {
        resource_type: String,
        name: String,
        path: PathBuf,
        allowed: Vec<String>,
    },

    /// Invalid registry or descriptor configuration
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Instance requested for a name absent from the store
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// Name already taken by another resource in the same manager
    #[error("duplicate resource name '{name}': already loaded as {existing_type}, cannot load as {resource_type}")]
    DuplicateName {
        name: String,
        existing_type: String,
        resource_type: String,
    },

    /// Decoder rejected the file contents
    #[error("failed to decode {resource_type} '{name}' from '{}': {message}", path.display())]
    Decode {
        resource_type: String,
        name: String,
        path: PathBuf,
        message: String,
    },

    /// Reading a validated file failed
    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Create a configuration error with a free-form message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// A descriptor names a type with no registry entry
    pub fn unknown_type(resource_type: &str, name: &str) -> Self {
        Self::configuration(format!(
            "unknown resource type '{}' for resource '{}'",
            resource_type, name
        ))
    }

    /// A folder mapping names a type with no registry entry
    pub fn unknown_folder_type(resource_type: &str) -> Self {
        Self::configuration(format!(
            "cannot set folder for unknown resource type '{}'",
            resource_type
        ))
    }

    /// A descriptor is missing its `type` field
    pub fn missing_type(name: &str) -> Self {
        Self::configuration(format!("resource '{}' does not specify a type", name))
    }

    /// A required field is absent or has the wrong shape
    pub fn missing_field(resource_type: &str, name: &str, field: &str) -> Self {
        Self::configuration(format!(
            "{} '{}' is missing required field '{}'",
            resource_type, name, field
        ))
    }

    /// Fields of the rect table `key` are missing or not numeric
    pub fn invalid_geometry(resource_type: &str, name: &str, key: &str, fields: &[&str]) -> Self {
        Self::configuration(format!(
            "{} '{}' has missing or non-numeric {} fields: {}",
            resource_type,
            name,
            key,
            fields.join(", ")
        ))
    }

    /// Geometry values too large to place on screen
    pub fn geometry_out_of_range(resource_type: &str, name: &str, fields: &[&str]) -> Self {
        Self::configuration(format!(
            "{} '{}' has geometry outside +/-{}: {}",
            resource_type,
            name,
            MAX_COORDINATE,
            fields.join(", ")
        ))
    }

    /// A file-based type was used before its folder was configured
    pub fn folder_not_configured(resource_type: &str) -> Self {
        Self::configuration(format!(
            "no source folder configured for resource type '{}'",
            resource_type
        ))
    }

    pub fn template_not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }

    /// Get the resource name this error refers to, if any
    pub fn resource_name(&self) -> Option<&str> {
        match self {
            Self::NotFound { name, .. }
            | Self::InvalidFormat { name, .. }
            | Self::TemplateNotFound { name }
            | Self::DuplicateName { name, .. }
            | Self::Decode { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Get the failing path, if the error is tied to a file
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound { path, .. }
            | Self::InvalidFormat { path, .. }
            | Self::Decode { path, .. }
            | Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}
