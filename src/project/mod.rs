//! Assembly resolution for type-name qualification.
//!
//! Qualifying a type name requires the display identity of every assembly the type touches.
//! Metadata only records references; this module maps those references to identities.
//!
//! # Key Components
//!
//! - [`AssemblyResolver`] - The resolution seam consumed by the encoder
//! - [`AssemblyCache`] - Concurrent, read-mostly cache keyed by simple name, optionally in
//!   front of another resolver
//! - [`SearchPathResolver`] - Bounded, non-recursive probing of search directories
//! - [`IdentityReader`] - Seam to the metadata reader that extracts a file's own identity

mod cache;
mod loader;
mod resolver;

pub use cache::AssemblyCache;
pub use loader::{IdentityReader, SearchPathResolver};
pub use resolver::AssemblyResolver;
