use std::fmt;

/// The highest array rank the runtime accepts.
pub const MAX_ARRAY_RANK: u32 = 32;

#[allow(non_snake_case, dead_code, missing_docs)]
/// Possible bytes that represent various 'Types' for a signature - from coreclr
pub mod ELEMENT_TYPE {
    //Marks end of a list
    pub const END: u8 = 0x00;
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    // Followed by type
    pub const PTR: u8 = 0x0f;
    // Followed by type
    pub const BYREF: u8 = 0x10;
    // Followed by TypeDef or TypeRef token
    pub const VALUETYPE: u8 = 0x11;
    // Followed by TypeDef or TypeRef token
    pub const CLASS: u8 = 0x12;
    // Generic parameter in a generic type definition, represented as number
    pub const VAR: u8 = 0x13;
    // type rank boundsCount bound1 … loCount lo1 …
    pub const ARRAY: u8 = 0x14;
    // Generic type instantiation. Followed by type type-arg-count type-1 ... type-n
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    // System.IntPtr
    pub const I: u8 = 0x18;
    // System.UIntPtr
    pub const U: u8 = 0x19;
    // Followed by full method signature
    pub const FNPTR: u8 = 0x1b;
    // System.Object
    pub const OBJECT: u8 = 0x1c;
    // Single-dim array with 0 lower bound
    pub const SZARRAY: u8 = 0x1d;
    // Generic parameter in a generic method definition,represented as number
    pub const MVAR: u8 = 0x1e;
    // Required modifier, followed by a TypeDef or TypeRef token
    pub const CMOD_REQD: u8 = 0x1f;
    // Optional modifier, followed by a TypeDef or TypeRef token
    pub const CMOD_OPT: u8 = 0x20;
    // Start of the vararg part of a method signature
    pub const SENTINEL: u8 = 0x41;
    // Local variable is pinned
    pub const PINNED: u8 = 0x45;
}

/// A type constructor applied on top of an element type.
///
/// A [`crate::metadata::typesystem::TypeRef`] carries these in application order: the first
/// entry wraps the base type, every further entry wraps the result of the previous one. The
/// textual suffixes are emitted in the same order, so `[Pointer, Array(1)]` is an array of
/// pointers and renders as `*[]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeModifier {
    /// Array of the given rank. Rank 1 is the zero-based vector (`SZARRAY`, `[]`); higher
    /// ranks are the same runtime type as [`TypeModifier::MultiArray`] and are normalized to
    /// it when a type reference is built.
    Array(u32),
    /// General array (`ARRAY`) of the given rank. A rank 1 general array is not a vector and
    /// renders as `[*]`; rank `n` renders as `n - 1` commas in brackets.
    MultiArray(u32),
    /// Unmanaged pointer, `*`
    Pointer,
    /// Managed reference, `&`. Only valid as the outermost modifier.
    ByRef,
}

impl TypeModifier {
    /// The array rank, if this modifier is an array.
    #[must_use]
    pub fn rank(&self) -> Option<u32> {
        match self {
            TypeModifier::Array(rank) | TypeModifier::MultiArray(rank) => Some(*rank),
            TypeModifier::Pointer | TypeModifier::ByRef => None,
        }
    }

    /// Canonical form: multi-dimensional vectors become general arrays.
    #[must_use]
    pub(crate) fn normalized(self) -> Self {
        match self {
            TypeModifier::Array(rank) if rank >= 2 => TypeModifier::MultiArray(rank),
            other => other,
        }
    }
}

impl fmt::Display for TypeModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeModifier::Array(1) => f.write_str("[]"),
            TypeModifier::MultiArray(1) => f.write_str("[*]"),
            TypeModifier::Array(rank) | TypeModifier::MultiArray(rank) => {
                f.write_str("[")?;
                for _ in 1..*rank {
                    f.write_str(",")?;
                }
                f.write_str("]")
            }
            TypeModifier::Pointer => f.write_str("*"),
            TypeModifier::ByRef => f.write_str("&"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_suffixes() {
        assert_eq!(TypeModifier::Array(1).to_string(), "[]");
        assert_eq!(TypeModifier::MultiArray(1).to_string(), "[*]");
        assert_eq!(TypeModifier::MultiArray(2).to_string(), "[,]");
        assert_eq!(TypeModifier::Array(3).to_string(), "[,,]");
        assert_eq!(TypeModifier::Pointer.to_string(), "*");
        assert_eq!(TypeModifier::ByRef.to_string(), "&");
    }

    #[test]
    fn test_modifier_normalization() {
        assert_eq!(TypeModifier::Array(1).normalized(), TypeModifier::Array(1));
        assert_eq!(
            TypeModifier::Array(2).normalized(),
            TypeModifier::MultiArray(2)
        );
        assert_eq!(
            TypeModifier::MultiArray(1).normalized(),
            TypeModifier::MultiArray(1)
        );
        assert_eq!(TypeModifier::ByRef.normalized(), TypeModifier::ByRef);
    }

    #[test]
    fn test_modifier_rank() {
        assert_eq!(TypeModifier::Array(1).rank(), Some(1));
        assert_eq!(TypeModifier::MultiArray(4).rank(), Some(4));
        assert_eq!(TypeModifier::Pointer.rank(), None);
    }

    #[test]
    fn test_element_type_constants() {
        assert_eq!(ELEMENT_TYPE::BOOLEAN, 0x02);
        assert_eq!(ELEMENT_TYPE::STRING, 0x0e);
        assert_eq!(ELEMENT_TYPE::GENERICINST, 0x15);
        assert_eq!(ELEMENT_TYPE::SZARRAY, 0x1d);
    }
}
