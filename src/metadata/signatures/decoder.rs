//! Decoding of binary type signatures into [`TypeSignature`] trees.
//!
//! Reads the ECMA-335 II.23.2 encoding: compressed integers, compressed
//! `TypeDefOrRefOrSpecEncoded` tokens, custom modifiers (skipped) and nested element types.

use crate::{
    metadata::{
        signatures::TypeSignature,
        typename::MAX_NESTING_DEPTH,
        typesystem::{TypeRef, ELEMENT_TYPE},
    },
    Error::RecursionLimit,
    Result,
};

/// Decoder for binary type signatures (`TypeSpec` blobs and single types in other signatures)
///
/// `TypeDefOrRefOrSpecEncoded` tokens are expanded to full metadata tokens and handed to the
/// resolver closure, which maps them to [`TypeRef`]s using the module's tables.
///
/// # Example
///
/// ```rust
/// use typeident::metadata::signatures::{SignatureDecoder, TypeSignature};
///
/// // int32[]
/// let mut decoder = SignatureDecoder::new(&[0x1D, 0x08], |token| {
///     Err(typeident::Error::UnresolvedAssembly(format!("{token:08X}")))
/// });
/// let sig = decoder.decode_type()?;
/// assert_eq!(sig, TypeSignature::SzArray(Box::new(TypeSignature::I4)));
/// # Ok::<(), typeident::Error>(())
/// ```
pub struct SignatureDecoder<'a, F> {
    data: &'a [u8],
    position: usize,
    depth: usize,
    resolve: F,
}

impl<'a, F> SignatureDecoder<'a, F>
where
    F: Fn(u32) -> Result<TypeRef>,
{
    /// Create a new `SignatureDecoder` from a byte slice
    ///
    /// ## Arguments
    /// * 'data'    - The byte slice to read from
    /// * 'resolve' - Maps a `TypeDef`, `TypeRef` or `TypeSpec` token to its type
    pub fn new(data: &'a [u8], resolve: F) -> Self {
        SignatureDecoder {
            data,
            position: 0,
            depth: 0,
            resolve,
        }
    }

    /// Decode a complete blob holding exactly one type
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the blob is truncated, uses an unknown element
    /// type, or has bytes left after the type.
    pub fn decode_type_spec(mut self) -> Result<TypeSignature> {
        let signature = self.decode_type()?;
        if self.position != self.data.len() {
            return Err(malformed_error!(
                "{} trailing bytes after type signature",
                self.data.len() - self.position
            ));
        }

        Ok(signature)
    }

    /// Decode the next type in the blob
    ///
    /// # Errors
    /// Returns an error if the blob is malformed, a token cannot be resolved, or nesting
    /// exceeds [`MAX_NESTING_DEPTH`].
    pub fn decode_type(&mut self) -> Result<TypeSignature> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(RecursionLimit(MAX_NESTING_DEPTH));
        }

        let signature = self.decode_element()?;
        self.depth -= 1;
        Ok(signature)
    }

    fn decode_element(&mut self) -> Result<TypeSignature> {
        self.skip_custom_mods()?;

        let current_byte = self.read_u8()?;
        match current_byte {
            ELEMENT_TYPE::VOID => Ok(TypeSignature::Void),
            ELEMENT_TYPE::BOOLEAN => Ok(TypeSignature::Boolean),
            ELEMENT_TYPE::CHAR => Ok(TypeSignature::Char),
            ELEMENT_TYPE::I1 => Ok(TypeSignature::I1),
            ELEMENT_TYPE::U1 => Ok(TypeSignature::U1),
            ELEMENT_TYPE::I2 => Ok(TypeSignature::I2),
            ELEMENT_TYPE::U2 => Ok(TypeSignature::U2),
            ELEMENT_TYPE::I4 => Ok(TypeSignature::I4),
            ELEMENT_TYPE::U4 => Ok(TypeSignature::U4),
            ELEMENT_TYPE::I8 => Ok(TypeSignature::I8),
            ELEMENT_TYPE::U8 => Ok(TypeSignature::U8),
            ELEMENT_TYPE::R4 => Ok(TypeSignature::R4),
            ELEMENT_TYPE::R8 => Ok(TypeSignature::R8),
            ELEMENT_TYPE::STRING => Ok(TypeSignature::String),
            ELEMENT_TYPE::TYPEDBYREF => Ok(TypeSignature::TypedByRef),
            ELEMENT_TYPE::I => Ok(TypeSignature::I),
            ELEMENT_TYPE::U => Ok(TypeSignature::U),
            ELEMENT_TYPE::OBJECT => Ok(TypeSignature::Object),
            ELEMENT_TYPE::PTR => Ok(TypeSignature::Ptr(Box::new(self.decode_type()?))),
            ELEMENT_TYPE::BYREF => Ok(TypeSignature::ByRef(Box::new(self.decode_type()?))),
            ELEMENT_TYPE::SZARRAY => Ok(TypeSignature::SzArray(Box::new(self.decode_type()?))),
            ELEMENT_TYPE::PINNED => self.decode_type(),
            ELEMENT_TYPE::VALUETYPE => Ok(TypeSignature::ValueType(self.read_type_token()?)),
            ELEMENT_TYPE::CLASS => Ok(TypeSignature::Class(self.read_type_token()?)),
            ELEMENT_TYPE::VAR => Ok(TypeSignature::GenericParamType(
                self.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::MVAR => Ok(TypeSignature::GenericParamMethod(
                self.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::ARRAY => {
                let base = self.decode_type()?;
                let rank = self.read_compressed_uint()?;

                // sizes and lower bounds do not change the type's identity
                let num_sizes = self.read_compressed_uint()?;
                for _ in 0..num_sizes {
                    self.read_compressed_uint()?;
                }
                let num_lo_bounds = self.read_compressed_uint()?;
                for _ in 0..num_lo_bounds {
                    self.read_compressed_uint()?;
                }

                Ok(TypeSignature::Array {
                    base: Box::new(base),
                    rank,
                })
            }
            ELEMENT_TYPE::GENERICINST => {
                let peek_byte = self.peek_u8()?;
                if peek_byte != ELEMENT_TYPE::CLASS && peek_byte != ELEMENT_TYPE::VALUETYPE {
                    return Err(malformed_error!(
                        "GENERICINST - Next byte is not TYPE_CLASS or TYPE_VALUE - {}",
                        peek_byte
                    ));
                }

                let base_type = self.decode_type()?;
                let arg_count = self.read_compressed_uint()?;

                let mut type_args = Vec::with_capacity(arg_count.min(64) as usize);
                for _ in 0..arg_count {
                    type_args.push(self.decode_type()?);
                }

                Ok(TypeSignature::GenericInst(Box::new(base_type), type_args))
            }
            ELEMENT_TYPE::FNPTR => {
                self.skip_method_signature()?;
                Ok(TypeSignature::FnPtr)
            }
            _ => Err(malformed_error!(
                "Unsupported ELEMENT_TYPE - {}",
                current_byte
            )),
        }
    }

    /// Skip a method signature (II.23.2.1); function pointers have no qualified name
    fn skip_method_signature(&mut self) -> Result<()> {
        let convention_byte = self.read_u8()?;
        if convention_byte & 0x10 != 0 {
            self.read_compressed_uint()?;
        }

        let param_count = self.read_compressed_uint()?;
        self.decode_type()?;

        for _ in 0..param_count {
            if self.peek_u8()? == ELEMENT_TYPE::SENTINEL {
                self.position += 1;
            }
            self.decode_type()?;
        }

        Ok(())
    }

    /// Skip custom modifiers (`CMOD_OPT` or `CMOD_REQD`)
    fn skip_custom_mods(&mut self) -> Result<()> {
        while self.position < self.data.len() {
            let next_byte = self.data[self.position];
            if next_byte != ELEMENT_TYPE::CMOD_REQD && next_byte != ELEMENT_TYPE::CMOD_OPT {
                break;
            }

            self.position += 1;
            self.read_compressed_uint()?;
        }

        Ok(())
    }

    fn read_type_token(&mut self) -> Result<TypeRef> {
        let compressed_token = self.read_compressed_uint()?;

        let table: u32 = match compressed_token & 0x3 {
            0x0 => 0x0200_0000, // TypeDef
            0x1 => 0x0100_0000, // TypeRef
            0x2 => 0x1B00_0000, // TypeSpec
            _ => {
                return Err(malformed_error!(
                    "Invalid compressed token - {}",
                    compressed_token
                ))
            }
        };

        (self.resolve)(table | (compressed_token >> 2))
    }

    fn peek_u8(&self) -> Result<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or_else(|| malformed_error!("Unexpected end of signature blob"))
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    fn read_compressed_uint(&mut self) -> Result<u32> {
        let first_byte = self.read_u8()?;

        // 1-byte encoding: 0xxxxxxx
        if (first_byte & 0x80) == 0 {
            return Ok(u32::from(first_byte));
        }

        // 2-byte encoding: 10xxxxxx xxxxxxxx
        if (first_byte & 0xC0) == 0x80 {
            let second_byte = self.read_u8()?;
            return Ok(((u32::from(first_byte) & 0x3F) << 8) | u32::from(second_byte));
        }

        // 4-byte encoding: 11xxxxxx xxxxxxxx xxxxxxxx xxxxxxxx
        if (first_byte & 0xE0) == 0xC0 {
            let b1 = u32::from(self.read_u8()?);
            let b2 = u32::from(self.read_u8()?);
            let b3 = u32::from(self.read_u8()?);
            return Ok(((u32::from(first_byte) & 0x1F) << 24) | (b1 << 16) | (b2 << 8) | b3);
        }

        Err(malformed_error!("Invalid compressed uint - {}", first_byte))
    }
}

/// Decode a `TypeSpec` blob, resolving type tokens with `resolve`
///
/// # Errors
/// See [`SignatureDecoder::decode_type_spec`].
pub fn decode_type_signature<F>(data: &[u8], resolve: F) -> Result<TypeSignature>
where
    F: Fn(u32) -> Result<TypeRef>,
{
    SignatureDecoder::new(data, resolve).decode_type_spec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test::{corlib, dictionary},
        Error,
    };

    fn tokens(token: u32) -> Result<TypeRef> {
        match token {
            0x0100_0010 => Ok(dictionary().generic_definition()),
            0x0200_0003 => TypeRef::simple("App", "Point", corlib()),
            _ => Err(Error::UnresolvedAssembly(format!("{token:08X}"))),
        }
    }

    #[test]
    fn test_primitive_types() {
        let test_cases = [
            (vec![0x01], TypeSignature::Void),
            (vec![0x02], TypeSignature::Boolean),
            (vec![0x08], TypeSignature::I4),
            (vec![0x0E], TypeSignature::String),
            (vec![0x16], TypeSignature::TypedByRef),
            (vec![0x18], TypeSignature::I),
            (vec![0x1C], TypeSignature::Object),
        ];

        for (bytes, expected_type) in test_cases {
            assert_eq!(decode_type_signature(&bytes, tokens).unwrap(), expected_type);
        }
    }

    #[test]
    fn test_class_and_valuetype() {
        // TypeRef row 0x10 encodes as (0x10 << 2) | 1
        assert_eq!(
            decode_type_signature(&[0x12, 0x41], tokens).unwrap(),
            TypeSignature::Class(dictionary().generic_definition())
        );

        // TypeDef row 3 encodes as 3 << 2
        assert!(matches!(
            decode_type_signature(&[0x11, 0x0C], tokens).unwrap(),
            TypeSignature::ValueType(point) if point.name() == "Point"
        ));
    }

    #[test]
    fn test_generic_instance() {
        let sig = decode_type_signature(&[0x15, 0x12, 0x41, 0x02, 0x0E, 0x1C], tokens).unwrap();
        assert_eq!(
            sig,
            TypeSignature::GenericInst(
                Box::new(TypeSignature::Class(dictionary().generic_definition())),
                vec![TypeSignature::String, TypeSignature::Object],
            )
        );
    }

    #[test]
    fn test_arrays() {
        // int32[0..5, 0..3] - rank 2, two sizes, two lower bounds
        let sig =
            decode_type_signature(&[0x14, 0x08, 0x02, 0x02, 0x05, 0x03, 0x02, 0x00, 0x00], tokens)
                .unwrap();
        assert_eq!(
            sig,
            TypeSignature::Array {
                base: Box::new(TypeSignature::I4),
                rank: 2,
            }
        );
    }

    #[test]
    fn test_custom_mods_and_pointers() {
        // modreq(TypeRef 0x10) int32* &
        let sig = decode_type_signature(&[0x10, 0x0F, 0x1F, 0x41, 0x08], tokens).unwrap();
        assert_eq!(
            sig,
            TypeSignature::ByRef(Box::new(TypeSignature::Ptr(Box::new(TypeSignature::I4))))
        );
    }

    #[test]
    fn test_function_pointer() {
        // method int32 *(string, object)
        let sig = decode_type_signature(&[0x1B, 0x00, 0x02, 0x08, 0x0E, 0x1C], tokens).unwrap();
        assert_eq!(sig, TypeSignature::FnPtr);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            decode_type_signature(&[], tokens),
            Err(Error::Malformed { .. })
        ));
        assert!(matches!(
            decode_type_signature(&[0x15, 0x08], tokens),
            Err(Error::Malformed { .. })
        ));
        assert!(matches!(
            decode_type_signature(&[0x08, 0x08], tokens),
            Err(Error::Malformed { .. })
        ));
        assert!(matches!(
            decode_type_signature(&[0x12, 0x45], tokens),
            Err(Error::UnresolvedAssembly(_))
        ));
        assert!(matches!(
            decode_type_signature(&[0x12, 0x43], tokens),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_recursion_limit() {
        let mut blob = vec![ELEMENT_TYPE::SZARRAY; MAX_NESTING_DEPTH + 1];
        blob.push(ELEMENT_TYPE::I4);
        assert!(matches!(
            decode_type_signature(&blob, tokens),
            Err(Error::RecursionLimit(_))
        ));
    }
}
