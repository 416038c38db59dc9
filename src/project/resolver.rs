//! The assembly-resolution seam used by the type-name encoder.

use std::sync::Arc;

use crate::{metadata::identity::AssemblyIdentity, Result};

/// Maps an assembly reference found in metadata to the identity the runtime would load.
///
/// The encoder calls this once per distinct assembly reference it meets while qualifying a
/// type, including the assemblies of generic arguments. Implementations must be safe for
/// concurrent lookups and must fail fast: resolution is either a deterministic success or
/// a deterministic failure for a given configuration.
///
/// # Errors
///
/// Implementations return [`crate::Error::UnresolvedAssembly`] when no identity can be found.
/// They must never substitute a guessed default identity.
///
/// # Examples
///
/// ```rust
/// use typeident::{
///     metadata::identity::AssemblyIdentity,
///     project::AssemblyResolver,
///     Error, Result,
/// };
///
/// struct CoreOnly(AssemblyIdentity);
///
/// impl AssemblyResolver for CoreOnly {
///     fn resolve(&self, reference: &AssemblyIdentity) -> Result<AssemblyIdentity> {
///         if reference.name.eq_ignore_ascii_case(&self.0.name) {
///             Ok(self.0.clone())
///         } else {
///             Err(Error::UnresolvedAssembly(reference.name.clone()))
///         }
///     }
/// }
/// ```
pub trait AssemblyResolver: Send + Sync {
    /// Resolve `reference` to its display identity
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedAssembly`] if the reference cannot be located.
    fn resolve(&self, reference: &AssemblyIdentity) -> Result<AssemblyIdentity>;
}

impl<T: AssemblyResolver + ?Sized> AssemblyResolver for &T {
    fn resolve(&self, reference: &AssemblyIdentity) -> Result<AssemblyIdentity> {
        (**self).resolve(reference)
    }
}

impl<T: AssemblyResolver + ?Sized> AssemblyResolver for Box<T> {
    fn resolve(&self, reference: &AssemblyIdentity) -> Result<AssemblyIdentity> {
        (**self).resolve(reference)
    }
}

impl<T: AssemblyResolver + ?Sized> AssemblyResolver for Arc<T> {
    fn resolve(&self, reference: &AssemblyIdentity) -> Result<AssemblyIdentity> {
        (**self).resolve(reference)
    }
}
