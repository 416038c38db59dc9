use crate::metadata::typesystem::{CilPrimitiveKind, TypeRef};

/// Decoded shape of an ECMA-335 type signature (II.23.2.12)
///
/// Type tokens are already resolved to [`TypeRef`]s by whoever decoded the blob. Custom
/// modifiers and `PINNED` markers are not represented; they do not contribute to a type's
/// qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    /// void
    Void,
    /// bool
    Boolean,
    /// char
    Char,
    /// signed 8bit integer
    I1,
    /// unsigned 8bit integer
    U1,
    /// signed 16bit integer
    I2,
    /// unsigned 16bit integer
    U2,
    /// signed 32bit integer
    I4,
    /// unsigned 32bit integer
    U4,
    /// signed 64bit integer
    I8,
    /// unsigned 64bit integer
    U8,
    /// 32bit floating-point
    R4,
    /// 64bit floating-point
    R8,
    /// signed integer, sized to executing platform
    I,
    /// unsigned integer, sized to executing platform
    U,
    /// System.Object
    Object,
    /// System.String
    String,
    /// Type is referenced during runtime
    TypedByRef,
    /// CIL Class
    Class(TypeRef),
    /// CIL value-type
    ValueType(TypeRef),
    /// Generic type and its arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Single dimension, zero based array
    SzArray(Box<TypeSignature>),
    /// General array
    Array {
        /// The type in the array
        base: Box<TypeSignature>,
        /// The number of dimensions
        rank: u32,
    },
    /// A pointer to a type
    Ptr(Box<TypeSignature>),
    /// Type by reference
    ByRef(Box<TypeSignature>),
    /// Generic type parameter
    // Index into GenericParam table
    GenericParamType(u32),
    /// Generic method parameter
    // Index into GenericParam table
    GenericParamMethod(u32),
    /// Function pointer
    FnPtr,
}

impl TypeSignature {
    /// The primitive this signature denotes, if it is encoded as a bare element type
    #[must_use]
    pub fn primitive(&self) -> Option<CilPrimitiveKind> {
        let kind = match self {
            TypeSignature::Void => CilPrimitiveKind::Void,
            TypeSignature::Boolean => CilPrimitiveKind::Boolean,
            TypeSignature::Char => CilPrimitiveKind::Char,
            TypeSignature::I1 => CilPrimitiveKind::I1,
            TypeSignature::U1 => CilPrimitiveKind::U1,
            TypeSignature::I2 => CilPrimitiveKind::I2,
            TypeSignature::U2 => CilPrimitiveKind::U2,
            TypeSignature::I4 => CilPrimitiveKind::I4,
            TypeSignature::U4 => CilPrimitiveKind::U4,
            TypeSignature::I8 => CilPrimitiveKind::I8,
            TypeSignature::U8 => CilPrimitiveKind::U8,
            TypeSignature::R4 => CilPrimitiveKind::R4,
            TypeSignature::R8 => CilPrimitiveKind::R8,
            TypeSignature::I => CilPrimitiveKind::I,
            TypeSignature::U => CilPrimitiveKind::U,
            TypeSignature::Object => CilPrimitiveKind::Object,
            TypeSignature::String => CilPrimitiveKind::String,
            TypeSignature::TypedByRef => CilPrimitiveKind::TypedReference,
            _ => return None,
        };

        Some(kind)
    }

    /// Signature for a primitive kind
    #[must_use]
    pub fn from_primitive(kind: CilPrimitiveKind) -> Self {
        match kind {
            CilPrimitiveKind::Void => TypeSignature::Void,
            CilPrimitiveKind::Boolean => TypeSignature::Boolean,
            CilPrimitiveKind::Char => TypeSignature::Char,
            CilPrimitiveKind::I1 => TypeSignature::I1,
            CilPrimitiveKind::U1 => TypeSignature::U1,
            CilPrimitiveKind::I2 => TypeSignature::I2,
            CilPrimitiveKind::U2 => TypeSignature::U2,
            CilPrimitiveKind::I4 => TypeSignature::I4,
            CilPrimitiveKind::U4 => TypeSignature::U4,
            CilPrimitiveKind::I8 => TypeSignature::I8,
            CilPrimitiveKind::U8 => TypeSignature::U8,
            CilPrimitiveKind::R4 => TypeSignature::R4,
            CilPrimitiveKind::R8 => TypeSignature::R8,
            CilPrimitiveKind::I => TypeSignature::I,
            CilPrimitiveKind::U => TypeSignature::U,
            CilPrimitiveKind::Object => TypeSignature::Object,
            CilPrimitiveKind::String => TypeSignature::String,
            CilPrimitiveKind::TypedReference => TypeSignature::TypedByRef,
        }
    }
}
