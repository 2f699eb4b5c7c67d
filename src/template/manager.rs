//! Template manager: loads descriptor batches into a store and hands out instances

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{info, warn};

use super::instance::{Instance, InstanceId};
use crate::descriptor::ResourceDescriptor;
use crate::error::ResourceError;
use crate::registry::TypeRegistry;
use crate::resource::{FontData, ResourceData, ResourceEntry};
use crate::source::{AssetSource, DiskSource};
use crate::store::ResourceStore;

/// Owns a type registry, a resource store, and the instance id counter
///
/// Batches are atomic: either every descriptor in a call to
/// [`load_resources`](Self::load_resources) lands in the store, or none do.
#[derive(Debug)]
pub struct TemplateManager<S: AssetSource = DiskSource> {
    registry: TypeRegistry,
    store: ResourceStore,
    source: S,
    /// Types this manager serves; `None` serves every registered type
    allowed_types: Option<HashSet<String>>,
    next_instance: AtomicU64,
}

impl Default for TemplateManager<DiskSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateManager<DiskSource> {
    /// A manager over the local filesystem with every built-in type
    pub fn new() -> Self {
        Self::with_source(DiskSource)
    }
}

impl<S: AssetSource> TemplateManager<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            registry: TypeRegistry::builtin(),
            store: ResourceStore::new(),
            source,
            allowed_types: None,
            next_instance: AtomicU64::new(1),
        }
    }

    /// Replace the type registry
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Serve only the given type tags
    pub fn with_types<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.allowed_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether this manager accepts descriptors of `type_tag`
    pub fn serves(&self, type_tag: &str) -> bool {
        self.allowed_types
            .as_ref()
            .map_or(true, |types| types.contains(type_tag))
    }

    /// Configure source folders by type tag
    pub fn set_resource_folders<I, K, P>(&mut self, folders: I) -> Result<(), ResourceError>
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<PathBuf>,
    {
        let folders: Vec<(K, P)> = folders.into_iter().collect();
        for (tag, _) in &folders {
            let tag: &str = tag.as_ref();
            if !self.registry.contains(tag) || !self.serves(tag) {
                return Err(ResourceError::unknown_folder_type(tag));
            }
        }
        self.registry.set_folders(folders)
    }

    /// Validate, decode, and store a batch of descriptors, in order
    ///
    /// Returns the number of entries added. On error the store is unchanged.
    pub fn load_resources<'a, I>(&mut self, descriptors: I) -> Result<usize, ResourceError>
    where
        I: IntoIterator<Item = &'a ResourceDescriptor>,
    {
        let mut staged: Vec<ResourceEntry> = Vec::new();
        let mut batch_names: HashMap<&'a str, &'a str> = HashMap::new();

        for descriptor in descriptors {
            match self.stage(descriptor, &mut batch_names) {
                Ok(entry) => staged.push(entry),
                Err(err) => {
                    warn!(
                        name = %descriptor.name,
                        discarded = staged.len(),
                        error = %err,
                        "resource batch rolled back"
                    );
                    return Err(err);
                }
            }
        }

        let count = staged.len();
        for entry in staged {
            self.store.insert(entry)?;
        }
        info!(loaded = count, total = self.store.len(), "resource batch committed");
        Ok(count)
    }

    /// Same as [`load_resources`](Self::load_resources)
    pub fn load_all<'a, I>(&mut self, descriptors: I) -> Result<usize, ResourceError>
    where
        I: IntoIterator<Item = &'a ResourceDescriptor>,
    {
        self.load_resources(descriptors)
    }

    fn stage<'a>(
        &self,
        descriptor: &'a ResourceDescriptor,
        batch_names: &mut HashMap<&'a str, &'a str>,
    ) -> Result<ResourceEntry, ResourceError> {
        let tag = descriptor.type_tag.as_str();
        let name = descriptor.name.as_str();

        self.registry.resolve(tag)?;
        if !self.serves(tag) {
            return Err(ResourceError::configuration(format!(
                "resource type '{}' of '{}' is not served by this manager",
                tag, name
            )));
        }

        let existing = self
            .store
            .type_of(name)
            .or_else(|| batch_names.get(name).copied());
        if let Some(existing_type) = existing {
            return Err(ResourceError::DuplicateName {
                name: name.to_string(),
                existing_type: existing_type.to_string(),
                resource_type: tag.to_string(),
            });
        }

        let entry = self.registry.load(descriptor, &self.source)?;
        batch_names.insert(name, tag);
        Ok(entry)
    }

    /// Create a fresh instance of a loaded resource
    pub fn create_resource_instance(&self, name: &str) -> Result<Instance, ResourceError> {
        let entry = self
            .store
            .get(name)
            .ok_or_else(|| ResourceError::template_not_found(name))?;
        let id = InstanceId(self.next_instance.fetch_add(1, Ordering::Relaxed));
        Ok(Instance::from_entry(id, entry))
    }

    /// A loaded font, for handing to [`Instance::set_font`]
    pub fn font(&self, name: &str) -> Result<FontData, ResourceError> {
        let entry = self
            .store
            .get(name)
            .ok_or_else(|| ResourceError::template_not_found(name))?;
        match &entry.data {
            ResourceData::Font(font) => Ok(font.clone()),
            _ => Err(ResourceError::configuration(format!(
                "resource '{}' is a {}, not a font",
                name, entry.type_tag
            ))),
        }
    }

    /// Drop every loaded entry; instance ids keep counting up
    pub fn clear_resources(&mut self) {
        let dropped = self.store.len();
        self.store.clear();
        info!(dropped, "resources cleared");
    }

    pub fn get(&self, name: &str) -> Option<&ResourceEntry> {
        self.store.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    /// Loaded names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.store.names()
    }

    /// Loaded entries of one type, sorted by name
    pub fn resources_of(&self, type_tag: &str) -> Vec<&ResourceEntry> {
        let mut entries: Vec<&ResourceEntry> = self.store.of_type(type_tag).collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
