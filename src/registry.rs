use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::rest::Twitter;
use crate::settings::Settings;

/// Name of the implicit default instance
pub const DEFAULT_INSTANCE: &str = "default";

/// Registry maps names to shared clients.
///
/// Construct one at startup with the file-level defaults and hand out
/// references to it. Entries are created once and never replaced.
#[derive(Debug, Default)]
pub struct Registry {
    defaults: Settings,
    instances: Mutex<HashMap<String, Arc<Twitter>>>,
}

impl Registry {
    /// Create a registry with the given default settings
    pub fn new(defaults: Settings) -> Self {
        Registry {
            defaults,
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Create a registry whose defaults come from a JSON settings file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Registry::new(Settings::load(path)?))
    }

    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Twitter>>> {
        self.instances.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create the client called `name`, or return the existing one.
    ///
    /// An existing entry is never overwritten: it is returned as is, the
    /// `overrides` are ignored and a warning is logged.
    pub fn forge(&self, name: &str, overrides: Settings) -> Result<Arc<Twitter>> {
        let mut instances = self.lock();

        if let Some(existing) = instances.get(name) {
            tracing::warn!(
                instance = %name,
                "Twitter with this name already exists, cannot be overwritten"
            );
            return Ok(Arc::clone(existing));
        }

        self.insert_new(&mut instances, name, overrides)
    }

    /// Build a client from the merged settings and store it; the caller holds the lock
    fn insert_new(
        &self,
        instances: &mut HashMap<String, Arc<Twitter>>,
        name: &str,
        overrides: Settings,
    ) -> Result<Arc<Twitter>> {
        let settings = self.defaults.clone().merge(overrides);
        let twitter = Arc::new(Twitter::from_settings(&settings)?);
        instances.insert(name.to_string(), Arc::clone(&twitter));

        tracing::debug!(instance = %name, "forged twitter instance");
        Ok(twitter)
    }

    /// Look up a client by name; `None` if it was never forged
    pub fn instance(&self, name: &str) -> Option<Arc<Twitter>> {
        self.lock().get(name).cloned()
    }

    /// The default client, forged from the defaults on first access.
    /// Lookup and creation happen under one lock, so racing first accesses
    /// share a single instance without a warning.
    pub fn default_instance(&self) -> Result<Arc<Twitter>> {
        let mut instances = self.lock();
        if let Some(existing) = instances.get(DEFAULT_INSTANCE) {
            return Ok(Arc::clone(existing));
        }
        self.insert_new(&mut instances, DEFAULT_INSTANCE, Settings::default())
    }

    /// Names of all forged clients
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }
}
