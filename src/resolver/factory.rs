//! Resolver factories
//!
//! Extensions contribute resolvers through factories registered by name.
//! Configuration carries typed values; the registry matches each one to
//! the factory that accepts its type and asks it to build a resolver. A
//! factory that declines aborts configuration of the owning formatter,
//! unlike resolution at compile time, which never fails.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::FormatError;
use crate::resolver::CommandResolver;

/// Factory contract for configuration-time resolver construction.
pub trait ResolverFactory: Send + Sync {
    /// Unique registration name, e.g. `logline.resolvers.static`.
    fn name(&self) -> &'static str;

    /// Configuration type identifiers this factory accepts.
    fn config_types(&self) -> Vec<&'static str>;

    /// A default configuration value for this factory.
    fn empty_config(&self) -> Value;

    /// Build a resolver from a decoded configuration value. `None` signals
    /// a config this factory cannot honor.
    fn create_from_config(&self, config: &Value) -> Option<Box<dyn CommandResolver>>;
}

/// Registry of resolver factories, keyed by name and searchable by
/// accepted configuration type.
///
/// Registration order decides which factory claims a type when several
/// accept it, so lookups stay deterministic.
pub struct FactoryRegistry {
    factories: IndexMap<String, Box<dyn ResolverFactory>>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        FactoryRegistry {
            factories: IndexMap::new(),
        }
    }

    /// Register a factory under its own name. A factory registered twice
    /// replaces the earlier entry.
    pub fn register<F: ResolverFactory + 'static>(&mut self, factory: F) {
        self.factories
            .insert(factory.name().to_string(), Box::new(factory));
    }

    pub fn get(&self, name: &str) -> Option<&dyn ResolverFactory> {
        self.factories.get(name).map(|factory| factory.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// First registered factory accepting `type_id`.
    pub fn for_config_type(&self, type_id: &str) -> Option<&dyn ResolverFactory> {
        self.factories
            .values()
            .find(|factory| {
                factory
                    .config_types()
                    .iter()
                    .any(|accepted| *accepted == type_id)
            })
            .map(|factory| factory.as_ref())
    }

    /// Registered factory names, sorted.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Build the resolver list for a formatter from its extension configs.
    ///
    /// Each entry pairs a configuration type identifier with its decoded
    /// value. The resolvers come back in config order, which is the order
    /// the resolution chain will consult them in. An unknown type or a
    /// declining factory fails the whole formatter.
    pub fn build(
        &self,
        configs: &[(String, Value)],
    ) -> Result<Vec<Box<dyn CommandResolver>>, FormatError> {
        let mut resolvers = Vec::with_capacity(configs.len());
        for (type_id, config) in configs {
            let factory =
                self.for_config_type(type_id)
                    .ok_or_else(|| FormatError::UnknownConfigType {
                        type_id: type_id.clone(),
                    })?;
            let resolver =
                factory
                    .create_from_config(config)
                    .ok_or_else(|| FormatError::Factory {
                        name: factory.name().to_string(),
                    })?;
            resolvers.push(resolver);
        }
        Ok(resolvers)
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
