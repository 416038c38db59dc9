//! Type reference model for metadata-level types.
//!
//! This module provides the read-only graph a metadata reader produces for each type
//! occurrence: which assembly the metadata says defines the type, its namespace and
//! nesting chain, its generic arity and arguments, and the array, pointer and by-ref
//! constructors wrapped around it.
//!
//! # Key Components
//!
//! - [`TypeRef`]: Immutable, validated type occurrence with structural equality and hashing
//! - [`TypeRefBuilder`]: Builder pattern for constructing type references from metadata rows
//! - [`TypeModifier`]: Array, pointer and by-ref constructors
//! - [`CilPrimitiveKind`]: Built-in types with dedicated signature encodings
//!
//! # Examples
//!
//! ```rust
//! use typeident::metadata::{
//!     identity::AssemblyIdentity,
//!     typesystem::{TypeModifier, TypeRef},
//! };
//!
//! let app = AssemblyIdentity::named("App");
//! let model = TypeRef::simple("App.Models", "Person", app)?;
//! let people = model.with_modifier(TypeModifier::Array(1))?;
//!
//! assert_eq!(people.element_type(), model);
//! # Ok::<(), typeident::Error>(())
//! ```

mod base;
mod builder;
mod primitives;
mod typeref;

pub use base::{TypeModifier, ELEMENT_TYPE, MAX_ARRAY_RANK};
pub use builder::{split_arity, TypeRefBuilder};
pub use primitives::CilPrimitiveKind;
pub use typeref::TypeRef;
