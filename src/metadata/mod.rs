//! Metadata-level descriptions of .NET types and assemblies.
//!
//! Everything in this module works on data read from a module's metadata tables and blobs;
//! nothing requires the described assemblies to be present or loadable.
//!
//! # Key Components
//!
//! - [`identity`] - Assembly names, versions, cultures and public key tokens
//! - [`typesystem`] - The immutable type reference model
//! - [`signatures`] - ECMA-335 type signatures and their lowering to type references
//! - [`typename`] - Assembly-qualified name encoding and parsing

/// Implementation of assembly identities and strong names
pub mod identity;
/// Implementation of method and type signatures
pub mod signatures;
/// Implementation of the assembly-qualified type name grammar
pub mod typename;
/// Implementation of the type reference model
pub mod typesystem;
