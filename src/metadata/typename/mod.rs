//! Assembly-qualified type names.
//!
//! This module turns [`crate::metadata::typesystem::TypeRef`] graphs into the exact string the
//! runtime reports as `Type.AssemblyQualifiedName`, and parses such strings back.
//!
//! # Key Components
//!
//! - [`TypeNameEncoder`] - Encoder bound to an [`crate::project::AssemblyResolver`]
//! - [`encode`] - One-shot encoding with a borrowed resolver
//! - [`parse_qualified_name`] - Inverse of the encoder
//! - [`escape()`] - Identifier escaping shared by both directions
//!
//! # Examples
//!
//! ```rust
//! use typeident::{
//!     metadata::typename::{encode, parse_qualified_name},
//!     project::AssemblyCache,
//! };
//!
//! let cache = AssemblyCache::new();
//! cache.register_display_name(
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//! )?;
//!
//! let text = "System.Nullable`1[[System.Boolean, mscorlib, Version=4.0.0.0, Culture=neutral, \
//!             PublicKeyToken=b77a5c561934e089]], mscorlib, Version=4.0.0.0, Culture=neutral, \
//!             PublicKeyToken=b77a5c561934e089";
//! let nullable = parse_qualified_name(text)?;
//! assert_eq!(encode(&nullable, &cache)?, text);
//! # Ok::<(), typeident::Error>(())
//! ```

mod encoder;
mod escaping;
mod parser;

pub use encoder::{encode, TypeNameEncoder, MAX_NESTING_DEPTH};
pub use escaping::{escape, is_reserved, RESERVED_CHARS};
pub use parser::parse_qualified_name;
