//! Built-in types with dedicated signature encodings.
//!
//! ECMA-335 signatures encode the core library's primitive types with single-byte element
//! types instead of `TypeRef` tokens. The [`CilPrimitiveKind`] enum names those types and
//! maps them to their `System.*` names. The defining assembly is never implied: whoever
//! lowers a signature supplies the core library the module actually references.

use strum::{EnumCount, EnumIter};

use crate::{metadata::typesystem::ELEMENT_TYPE, Result};

/// Represents all primitive types in CIL/.NET
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum CilPrimitiveKind {
    /// System.Void - represents no value
    Void,
    /// System.Boolean - true/false value
    Boolean,
    /// System.Char - Unicode 16-bit character
    Char,
    /// System.SByte - signed 8-bit integer
    I1,
    /// System.Byte - unsigned 8-bit integer
    U1,
    /// System.Int16 - signed 16-bit integer
    I2,
    /// System.UInt16 - unsigned 16-bit integer
    U2,
    /// System.Int32 - signed 32-bit integer
    I4,
    /// System.UInt32 - unsigned 32-bit integer
    U4,
    /// System.Int64 - signed 64-bit integer
    I8,
    /// System.UInt64 - unsigned 64-bit integer
    U8,
    /// System.Single - 32-bit floating point
    R4,
    /// System.Double - 64-bit floating point
    R8,
    /// System.IntPtr - native sized signed integer
    I,
    /// System.UIntPtr - native sized unsigned integer
    U,
    /// System.Object - base class for all reference types
    Object,
    /// System.String - immutable string of Unicode characters
    String,
    /// System.TypedReference - type-safe pointer (used by compiler)
    TypedReference,
}

impl CilPrimitiveKind {
    /// Map a signature element type byte to its primitive kind
    ///
    /// # Arguments
    /// * `type_byte` - The `ELEMENT_TYPE` value read from a signature blob
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the byte does not denote a primitive type.
    pub fn from_byte(type_byte: u8) -> Result<Self> {
        match type_byte {
            ELEMENT_TYPE::VOID => Ok(CilPrimitiveKind::Void),
            ELEMENT_TYPE::BOOLEAN => Ok(CilPrimitiveKind::Boolean),
            ELEMENT_TYPE::CHAR => Ok(CilPrimitiveKind::Char),
            ELEMENT_TYPE::I1 => Ok(CilPrimitiveKind::I1),
            ELEMENT_TYPE::U1 => Ok(CilPrimitiveKind::U1),
            ELEMENT_TYPE::I2 => Ok(CilPrimitiveKind::I2),
            ELEMENT_TYPE::U2 => Ok(CilPrimitiveKind::U2),
            ELEMENT_TYPE::I4 => Ok(CilPrimitiveKind::I4),
            ELEMENT_TYPE::U4 => Ok(CilPrimitiveKind::U4),
            ELEMENT_TYPE::I8 => Ok(CilPrimitiveKind::I8),
            ELEMENT_TYPE::U8 => Ok(CilPrimitiveKind::U8),
            ELEMENT_TYPE::R4 => Ok(CilPrimitiveKind::R4),
            ELEMENT_TYPE::R8 => Ok(CilPrimitiveKind::R8),
            ELEMENT_TYPE::I => Ok(CilPrimitiveKind::I),
            ELEMENT_TYPE::U => Ok(CilPrimitiveKind::U),
            ELEMENT_TYPE::OBJECT => Ok(CilPrimitiveKind::Object),
            ELEMENT_TYPE::STRING => Ok(CilPrimitiveKind::String),
            ELEMENT_TYPE::TYPEDBYREF => Ok(CilPrimitiveKind::TypedReference),
            _ => Err(malformed_error!(
                "Element type 0x{:02X} is not a primitive",
                type_byte
            )),
        }
    }

    /// The signature element type byte for this primitive
    #[must_use]
    pub fn element_type(&self) -> u8 {
        match self {
            CilPrimitiveKind::Void => ELEMENT_TYPE::VOID,
            CilPrimitiveKind::Boolean => ELEMENT_TYPE::BOOLEAN,
            CilPrimitiveKind::Char => ELEMENT_TYPE::CHAR,
            CilPrimitiveKind::I1 => ELEMENT_TYPE::I1,
            CilPrimitiveKind::U1 => ELEMENT_TYPE::U1,
            CilPrimitiveKind::I2 => ELEMENT_TYPE::I2,
            CilPrimitiveKind::U2 => ELEMENT_TYPE::U2,
            CilPrimitiveKind::I4 => ELEMENT_TYPE::I4,
            CilPrimitiveKind::U4 => ELEMENT_TYPE::U4,
            CilPrimitiveKind::I8 => ELEMENT_TYPE::I8,
            CilPrimitiveKind::U8 => ELEMENT_TYPE::U8,
            CilPrimitiveKind::R4 => ELEMENT_TYPE::R4,
            CilPrimitiveKind::R8 => ELEMENT_TYPE::R8,
            CilPrimitiveKind::I => ELEMENT_TYPE::I,
            CilPrimitiveKind::U => ELEMENT_TYPE::U,
            CilPrimitiveKind::Object => ELEMENT_TYPE::OBJECT,
            CilPrimitiveKind::String => ELEMENT_TYPE::STRING,
            CilPrimitiveKind::TypedReference => ELEMENT_TYPE::TYPEDBYREF,
        }
    }

    /// Get the namespace of this type
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        "System"
    }

    /// Get the short name (without namespace)
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CilPrimitiveKind::Void => "Void",
            CilPrimitiveKind::Boolean => "Boolean",
            CilPrimitiveKind::Char => "Char",
            CilPrimitiveKind::I1 => "SByte",
            CilPrimitiveKind::U1 => "Byte",
            CilPrimitiveKind::I2 => "Int16",
            CilPrimitiveKind::U2 => "UInt16",
            CilPrimitiveKind::I4 => "Int32",
            CilPrimitiveKind::U4 => "UInt32",
            CilPrimitiveKind::I8 => "Int64",
            CilPrimitiveKind::U8 => "UInt64",
            CilPrimitiveKind::R4 => "Single",
            CilPrimitiveKind::R8 => "Double",
            CilPrimitiveKind::I => "IntPtr",
            CilPrimitiveKind::U => "UIntPtr",
            CilPrimitiveKind::Object => "Object",
            CilPrimitiveKind::String => "String",
            CilPrimitiveKind::TypedReference => "TypedReference",
        }
    }

    /// Check if this primitive is a value type
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        !matches!(self, CilPrimitiveKind::Object | CilPrimitiveKind::String)
    }
}
