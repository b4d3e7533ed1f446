//! Bone name to output slot mapping
//!
//! Built once when a model is loaded. Each bone gets a dense, zero-based id in
//! first-registered order together with its offset (inverse bind) matrix.

use std::collections::HashMap;

use glam::Mat4;
use log::debug;

use crate::error::{AnimationError, Result};

/// Binding of one bone to the output matrix buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneInfo {
    /// Index into the output bone matrix buffer
    pub id: usize,
    /// Transforms a vertex from mesh space into this bone's space
    pub offset: Mat4,
}

/// Bone name to [`BoneInfo`] table with a fixed capacity
#[derive(Debug, Clone)]
pub struct BoneBindingTable {
    capacity: usize,
    entries: HashMap<String, BoneInfo>,
    names: Vec<String>,
}

impl BoneBindingTable {
    /// Create an empty table able to hold `capacity` bones
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// Build a table from an imported bone list
    ///
    /// A name repeated with an identical offset is registered once.
    pub fn from_bones<I, S>(bones: I, capacity: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Mat4)>,
        S: Into<String>,
    {
        let mut table = Self::new(capacity);
        for (name, offset) in bones {
            table.register(name, offset)?;
        }
        debug!(
            "Built bone binding table with {} bones (capacity {})",
            table.len(),
            table.capacity
        );
        Ok(table)
    }

    /// Register a bone and return its id
    pub fn register(&mut self, name: impl Into<String>, offset: Mat4) -> Result<usize> {
        let name = name.into();

        if let Some(existing) = self.entries.get(&name) {
            if existing.offset == offset {
                return Ok(existing.id);
            }
            return Err(AnimationError::DuplicateBone { name });
        }

        if self.names.len() >= self.capacity {
            return Err(AnimationError::CapacityExceeded {
                count: self.names.len() + 1,
                capacity: self.capacity,
            });
        }

        let id = self.names.len();
        self.entries.insert(name.clone(), BoneInfo { id, offset });
        self.names.push(name);
        Ok(id)
    }

    /// Register a bone that is animated but absent from the model's bone list
    ///
    /// Such bones bind with an identity offset. Already known names keep
    /// their existing binding.
    pub fn register_missing(&mut self, name: &str) -> Result<usize> {
        match self.entries.get(name) {
            Some(info) => Ok(info.id),
            None => {
                debug!("Binding animated bone '{name}' missing from the model");
                self.register(name, Mat4::IDENTITY)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&BoneInfo> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bone names ordered by id
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Bones ordered by id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoneInfo)> {
        self.names
            .iter()
            .filter_map(|name| self.entries.get(name).map(|info| (name.as_str(), info)))
    }
}
