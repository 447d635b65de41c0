//! Host Application
//!
//! The parts of the map application plugins interact with.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::ports::SearchImpl;

struct Registration {
    owner: String,
    provider: Arc<dyn SearchImpl>,
}

/// Search providers known to the application
#[derive(Default)]
pub struct SearchRegistry {
    entries: Vec<Registration>,
}

impl SearchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider on behalf of `owner`
    ///
    /// Provider names are unique within the registry.
    pub fn add(
        &mut self,
        provider: Arc<dyn SearchImpl>,
        owner: impl Into<String>,
    ) -> Result<(), DomainError> {
        let owner = owner.into();
        if self.get(provider.name()).is_some() {
            return Err(DomainError::Conflict(format!(
                "Search provider '{}' is already registered",
                provider.name()
            )));
        }

        info!(provider = %provider.name(), owner = %owner, "Registered search provider");
        self.entries.push(Registration { owner, provider });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SearchImpl>> {
        self.entries
            .iter()
            .find(|entry| entry.provider.name() == name)
            .map(|entry| Arc::clone(&entry.provider))
    }

    /// Names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.provider.name())
            .collect()
    }

    /// Drop every provider registered by `owner`, returning how many were removed
    pub fn remove_owned_by(&mut self, owner: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.owner != owner);
        let removed = before - self.entries.len();
        debug!(owner = %owner, removed = %removed, "Removed search providers");
        removed
    }

    /// Cancel outstanding searches of every provider
    pub fn abort_all(&self) {
        for entry in &self.entries {
            entry.provider.abort();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Application handed to plugins on initialization
#[derive(Default)]
pub struct App {
    pub search: SearchRegistry,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }
}
