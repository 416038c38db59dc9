//! # typeident Prelude
//!
//! The most commonly used types of the crate, for glob import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all typeident operations
pub use crate::Error;

/// The result type used throughout typeident
pub use crate::Result;

// ================================================================================================
// Assembly Identity
// ================================================================================================

/// Assembly identity and version
pub use crate::metadata::identity::{AssemblyIdentity, AssemblyVersion};

/// Strong-name identity and derived token
pub use crate::metadata::identity::{Identity, PublicKeyToken};

// ================================================================================================
// Type Model
// ================================================================================================

/// Type references and their construction
pub use crate::metadata::typesystem::{CilPrimitiveKind, TypeModifier, TypeRef, TypeRefBuilder};

/// Signature shapes and lowering
pub use crate::metadata::signatures::{
    decode_type_signature, LoweredType, SignatureLowering, TypeSignature,
};

// ================================================================================================
// Type Names
// ================================================================================================

/// Encoding and parsing of assembly-qualified names
pub use crate::metadata::typename::{encode, parse_qualified_name, TypeNameEncoder};

// ================================================================================================
// Assembly Resolution
// ================================================================================================

/// Resolver trait and implementations
pub use crate::project::{AssemblyCache, AssemblyResolver, IdentityReader, SearchPathResolver};
