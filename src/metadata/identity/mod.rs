//! Assembly identity for .NET assemblies.
//!
//! Every assembly-qualified type name ends in the display name of the assembly defining the
//! type. This module provides the identity model behind that qualifier and the strong-name
//! handling needed to render its `PublicKeyToken` component.
//!
//! # Module Structure
//!
//! - [`assembly`] - Assembly identity with name, version, culture, and public key token
//! - [`cryptographic`] - Public keys, tokens and the SHA-1 reduction between them
//!
//! # Examples
//!
//! ```rust
//! use typeident::metadata::identity::{AssemblyIdentity, AssemblyVersion, Identity};
//!
//! let identity = AssemblyIdentity::new(
//!     "MyLibrary",
//!     AssemblyVersion::new(1, 0, 0, 0),
//!     None,
//!     Some(Identity::Token(0x3a0a_d511_7f5f_3fb0)),
//! );
//! assert_eq!(
//!     identity.to_string(),
//!     "MyLibrary, Version=1.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a"
//! );
//! ```

pub mod assembly;
pub mod cryptographic;

pub use assembly::{AssemblyIdentity, AssemblyVersion};
pub use cryptographic::{Identity, PublicKeyToken};
