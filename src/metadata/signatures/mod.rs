//! Type signatures and their lowering to type references.
//!
//! A module reader decodes signature blobs into [`TypeSignature`] values, which mirror the
//! ECMA-335 type signature grammar with type tokens already resolved. [`SignatureLowering`]
//! then turns them into [`crate::metadata::typesystem::TypeRef`] graphs the name encoder
//! accepts.
//!
//! # Key Components
//!
//! - [`SignatureDecoder`] / [`decode_type_signature`] - Binary `TypeSpec` blob decoding
//! - [`TypeSignature`] - Decoded signature shape
//! - [`SignatureLowering`] - Signature to `TypeRef` conversion against a core library
//!
//! # Examples
//!
//! ```rust
//! use typeident::metadata::{
//!     identity::AssemblyIdentity,
//!     signatures::{decode_type_signature, SignatureLowering},
//! };
//!
//! // string[,]
//! let sig = decode_type_signature(&[0x14, 0x0E, 0x02, 0x00, 0x00], |_| unreachable!())?;
//! let lowered = SignatureLowering::new(AssemblyIdentity::named("mscorlib")).lower(&sig)?;
//! assert_eq!(lowered.type_ref.name(), "String");
//! # Ok::<(), typeident::Error>(())
//! ```
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 23.2 - Blobs and Signatures

mod decoder;
mod lowering;
mod types;

pub use decoder::{decode_type_signature, SignatureDecoder};
pub use lowering::{LoweredType, SignatureLowering};
pub use types::TypeSignature;
