//! Concurrent, read-mostly cache of resolved assembly identities.

use dashmap::DashMap;
use log::debug;

use crate::{
    metadata::identity::AssemblyIdentity, project::AssemblyResolver, Error, Result,
};

/// A thread-safe map from assembly simple names to display identities.
///
/// Keys are compared ASCII case-insensitively, matching how the runtime binds simple names.
/// Used alone, the cache resolves only what was [`register`](Self::register)ed. With a
/// fallback resolver it forwards misses and remembers every successful answer, so repeated
/// lookups of the same assembly never reach the fallback again. Failures are not cached.
///
/// # Examples
///
/// ```rust
/// use typeident::{
///     metadata::identity::AssemblyIdentity,
///     project::{AssemblyCache, AssemblyResolver},
/// };
///
/// let cache = AssemblyCache::new();
/// cache.register_display_name(
///     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
/// )?;
///
/// let resolved = cache.resolve(&AssemblyIdentity::named("MSCORLIB"))?;
/// assert_eq!(resolved.version.major, 4);
/// # Ok::<(), typeident::Error>(())
/// ```
pub struct AssemblyCache {
    entries: DashMap<String, AssemblyIdentity>,
    fallback: Option<Box<dyn AssemblyResolver>>,
}

impl AssemblyCache {
    /// Create an empty cache without fallback
    #[must_use]
    pub fn new() -> Self {
        AssemblyCache {
            entries: DashMap::new(),
            fallback: None,
        }
    }

    /// Create an empty cache in front of `fallback`
    ///
    /// ## Arguments
    /// * 'fallback' - Resolver consulted for names not yet in the cache
    #[must_use]
    pub fn with_fallback(fallback: impl AssemblyResolver + 'static) -> Self {
        AssemblyCache {
            entries: DashMap::new(),
            fallback: Some(Box::new(fallback)),
        }
    }

    fn key(name: &str) -> String {
        name.to_ascii_lowercase()
    }

    /// Register an identity, replacing any previous entry with the same simple name
    pub fn register(&self, identity: AssemblyIdentity) {
        self.entries.insert(Self::key(&identity.name), identity);
    }

    /// Parse and register an assembly display name
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the display name cannot be parsed.
    pub fn register_display_name(&self, display_name: &str) -> Result<()> {
        self.register(AssemblyIdentity::parse(display_name)?);
        Ok(())
    }

    /// Check if an identity for `name` is cached
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::key(name))
    }

    /// Number of cached identities
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache holds no identities
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AssemblyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AssemblyResolver for AssemblyCache {
    fn resolve(&self, reference: &AssemblyIdentity) -> Result<AssemblyIdentity> {
        let key = Self::key(&reference.name);
        if let Some(entry) = self.entries.get(&key) {
            return Ok(entry.value().clone());
        }

        let Some(fallback) = &self.fallback else {
            debug!("assembly '{}' is not registered", reference.name);
            return Err(Error::UnresolvedAssembly(reference.name.clone()));
        };

        let identity = fallback.resolve(reference)?;
        debug!("caching '{}' as '{}'", reference.name, identity);
        Ok(self.entries.entry(key).or_insert(identity).value().clone())
    }
}
