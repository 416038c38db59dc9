// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![allow(clippy::too_many_arguments)]

//! # typeident
//!
//! Canonical .NET type identities from bytecode metadata.
//!
//! Tools that read compiled .NET modules without loading them (serializers, shader
//! compilers, IL weavers) often have to emit the exact string the runtime reports as
//! `Type.AssemblyQualifiedName`. `typeident` builds that string byte-for-byte from a
//! metadata-level description of the type, without a runtime and without reflection.
//!
//! ## Features
//!
//! - **Type reference model** - Immutable [`metadata::typesystem::TypeRef`] graphs covering
//!   namespaces, nested types, open and closed generics, arrays, pointers and by-refs
//! - **Canonical encoder** - Runtime-exact qualified names including escaping
//! - **Parser** - The inverse of the encoder, for names found in configuration or attributes
//! - **Signature lowering** - From ECMA-335 type signatures to type references
//! - **Assembly resolution** - Concurrent identity cache and search-path probing
//!
//! ## Quick Start
//!
//! ```rust
//! use typeident::prelude::*;
//!
//! let cache = AssemblyCache::new();
//! cache.register_display_name(
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//! )?;
//!
//! let mscorlib = AssemblyIdentity::named("mscorlib");
//! let list = TypeRefBuilder::new(mscorlib.clone())
//!     .namespace("System.Collections.Generic")
//!     .metadata_name("List`1")
//!     .arg(TypeRef::simple("System", "String", mscorlib)?)
//!     .build()?;
//!
//! let encoder = TypeNameEncoder::new(&cache);
//! assert_eq!(
//!     encoder.encode(&list)?,
//!     "System.Collections.Generic.List`1[[System.String, mscorlib, Version=4.0.0.0, \
//!      Culture=neutral, PublicKeyToken=b77a5c561934e089]], mscorlib, Version=4.0.0.0, \
//!      Culture=neutral, PublicKeyToken=b77a5c561934e089"
//! );
//! # Ok::<(), typeident::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata::identity`] - Assembly identities, versions and public key tokens
//! - [`metadata::typesystem`] - The type reference model
//! - [`metadata::signatures`] - Decoded type signatures and their lowering
//! - [`metadata::typename`] - Qualified name encoding and parsing
//! - [`project`] - Assembly resolvers
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`](Result). Resolution failures are always
//! propagated: an encoder never substitutes a guessed assembly qualifier.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade. The library installs no
//! logger.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use typeident::prelude::*;
///
/// let identity = AssemblyIdentity::parse("App, Version=1.0.0.0")?;
/// assert_eq!(identity.version, AssemblyVersion::new(1, 0, 0, 0));
/// # Ok::<(), typeident::Error>(())
/// ```
pub mod prelude;

/// Assembly identities, type references, signatures and type names
pub mod metadata;

/// Mapping assembly references to the identities used as name qualifiers
pub mod project;

/// `typeident` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `typeident` Error type
///
/// Covers parsing, type reference validation, resolution and filesystem failures.
pub use error::Error;
