//! Resource store: decoded entries keyed by type, then by name

use std::collections::HashMap;

use crate::error::ResourceError;
use crate::resource::ResourceEntry;

/// Holds every loaded entry
///
/// Names are unique across all types. Entries are read-only once inserted.
#[derive(Debug, Default)]
pub struct ResourceStore {
    by_type: HashMap<String, HashMap<String, ResourceEntry>>,
    /// name -> type tag, for global uniqueness and direct lookup
    names: HashMap<String, String>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, rejecting names already used by any type
    pub fn insert(&mut self, entry: ResourceEntry) -> Result<(), ResourceError> {
        if let Some(existing) = self.names.get(&entry.name) {
            return Err(ResourceError::DuplicateName {
                name: entry.name.clone(),
                existing_type: existing.clone(),
                resource_type: entry.type_tag.clone(),
            });
        }

        self.names.insert(entry.name.clone(), entry.type_tag.clone());
        self.by_type
            .entry(entry.type_tag.clone())
            .or_default()
            .insert(entry.name.clone(), entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ResourceEntry> {
        let tag = self.names.get(name)?;
        self.by_type.get(tag)?.get(name)
    }

    /// The type a name was loaded as
    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// All entries of one type, in no particular order
    pub fn of_type<'a>(&'a self, type_tag: &str) -> impl Iterator<Item = &'a ResourceEntry> + 'a {
        self.by_type
            .get(type_tag)
            .into_iter()
            .flat_map(|entries| entries.values())
    }

    /// All names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_type.clear();
        self.names.clear();
    }
}
