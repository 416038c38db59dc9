//! Conversion of decoded signatures into [`TypeRef`] graphs.

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        signatures::TypeSignature,
        typename::MAX_NESTING_DEPTH,
        typesystem::{TypeModifier, TypeRef},
    },
    Error, Result,
};

/// Result of lowering one signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredType {
    /// The type the signature denotes
    pub type_ref: TypeRef,
    /// Every assembly reference the type touches, in first-seen order
    pub assemblies: Vec<AssemblyIdentity>,
}

/// Lowers [`TypeSignature`]s to [`TypeRef`]s.
///
/// Primitive element types carry no token in metadata; they are attributed to the core
/// library passed at construction, which should be the `mscorlib`, `System.Runtime` or
/// `netstandard` reference of the module being read. No primitive is ever given a shortcut
/// name: `I4` lowers to `System.Int32`.
///
/// # Examples
///
/// ```rust
/// use typeident::metadata::{
///     identity::AssemblyIdentity,
///     signatures::{SignatureLowering, TypeSignature},
/// };
///
/// let lowering = SignatureLowering::new(AssemblyIdentity::named("mscorlib"));
/// let lowered = lowering.lower(&TypeSignature::SzArray(Box::new(TypeSignature::I4)))?;
/// assert_eq!(lowered.type_ref.name(), "Int32");
/// assert_eq!(lowered.assemblies.len(), 1);
/// # Ok::<(), typeident::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SignatureLowering {
    core_library: AssemblyIdentity,
}

impl SignatureLowering {
    /// Create a lowering attributing primitives to `core_library`
    pub fn new(core_library: AssemblyIdentity) -> Self {
        SignatureLowering { core_library }
    }

    /// The assembly primitives are attributed to
    pub fn core_library(&self) -> &AssemblyIdentity {
        &self.core_library
    }

    /// Lower `signature` and collect the assemblies it references
    ///
    /// # Errors
    /// - [`Error::UnsupportedModifier`] for generic parameters and function pointers, which
    ///   have no assembly-qualified name
    /// - [`Error::MalformedTypeRef`] if a generic instantiation's base is not an open generic
    ///   definition with a matching arity
    /// - [`Error::RecursionLimit`] for signatures nested deeper than [`MAX_NESTING_DEPTH`]
    pub fn lower(&self, signature: &TypeSignature) -> Result<LoweredType> {
        let type_ref = self.lower_type(signature)?;
        let assemblies = type_ref
            .referenced_assemblies()
            .into_iter()
            .cloned()
            .collect();

        Ok(LoweredType {
            type_ref,
            assemblies,
        })
    }

    /// Lower `signature` to its [`TypeRef`] only
    ///
    /// # Errors
    /// See [`SignatureLowering::lower`].
    pub fn lower_type(&self, signature: &TypeSignature) -> Result<TypeRef> {
        self.lower_with_depth(signature, 0)
    }

    fn lower_with_depth(&self, signature: &TypeSignature, depth: usize) -> Result<TypeRef> {
        if depth > MAX_NESTING_DEPTH {
            return Err(Error::RecursionLimit(MAX_NESTING_DEPTH));
        }

        if let Some(kind) = signature.primitive() {
            return TypeRef::simple(kind.namespace(), kind.name(), self.core_library.clone());
        }

        match signature {
            TypeSignature::Class(type_ref) | TypeSignature::ValueType(type_ref) => {
                Ok(type_ref.clone())
            }
            TypeSignature::GenericInst(base, args) => {
                let definition = self.lower_with_depth(base, depth + 1)?;
                let args = args
                    .iter()
                    .map(|arg| self.lower_with_depth(arg, depth + 1))
                    .collect::<Result<Vec<_>>>()?;

                definition.instantiate(args)
            }
            TypeSignature::SzArray(base) => self
                .lower_with_depth(base, depth + 1)?
                .with_modifier(TypeModifier::Array(1)),
            TypeSignature::Array { base, rank } => self
                .lower_with_depth(base, depth + 1)?
                .with_modifier(TypeModifier::MultiArray(*rank)),
            TypeSignature::Ptr(base) => self
                .lower_with_depth(base, depth + 1)?
                .with_modifier(TypeModifier::Pointer),
            TypeSignature::ByRef(base) => self
                .lower_with_depth(base, depth + 1)?
                .with_modifier(TypeModifier::ByRef),
            TypeSignature::GenericParamType(index) => Err(Error::UnsupportedModifier(format!(
                "generic type parameter !{index} has no qualified name"
            ))),
            TypeSignature::GenericParamMethod(index) => Err(Error::UnsupportedModifier(
                format!("generic method parameter !!{index} has no qualified name"),
            )),
            TypeSignature::FnPtr => Err(Error::UnsupportedModifier(
                "function pointers have no qualified name".to_string(),
            )),
            other => Err(Error::UnsupportedModifier(format!(
                "unhandled signature {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{typename::encode, typesystem::CilPrimitiveKind},
        test::{corlib, dictionary, resolver, user_assembly, MSCORLIB, USER},
    };

    fn lowering() -> SignatureLowering {
        SignatureLowering::new(corlib())
    }

    #[test]
    fn test_primitives_use_core_library() {
        let lowered = lowering().lower(&TypeSignature::I4).unwrap();
        assert_eq!(lowered.type_ref.namespace(), "System");
        assert_eq!(lowered.type_ref.name(), "Int32");
        assert_eq!(lowered.assemblies, vec![corlib()]);

        let typed = lowering().lower_type(&TypeSignature::TypedByRef).unwrap();
        assert_eq!(typed.name(), CilPrimitiveKind::TypedReference.name());
    }

    #[test]
    fn test_arrays_and_pointers() {
        let sig = TypeSignature::SzArray(Box::new(TypeSignature::Ptr(Box::new(
            TypeSignature::Char,
        ))));
        let lowered = lowering().lower_type(&sig).unwrap();
        assert_eq!(
            lowered.modifiers(),
            [TypeModifier::Pointer, TypeModifier::Array(1)]
        );

        let general = TypeSignature::Array {
            base: Box::new(TypeSignature::R8),
            rank: 1,
        };
        assert_eq!(
            encode(&lowering().lower_type(&general).unwrap(), &resolver()).unwrap(),
            format!("System.Double[*], {MSCORLIB}")
        );
    }

    #[test]
    fn test_generic_instance() {
        let sig = TypeSignature::GenericInst(
            Box::new(TypeSignature::Class(dictionary().generic_definition())),
            vec![TypeSignature::String, TypeSignature::Object],
        );

        let lowered = lowering().lower(&sig).unwrap();
        assert_eq!(lowered.type_ref, dictionary());
        assert_eq!(lowered.assemblies, vec![corlib()]);
    }

    #[test]
    fn test_assemblies_are_collected() {
        let person = TypeRef::simple("App", "Person", user_assembly()).unwrap();
        let sig = TypeSignature::GenericInst(
            Box::new(TypeSignature::Class(
                TypeRef::generic_definition_of("System.Collections.Generic", "List", 1, corlib())
                    .unwrap(),
            )),
            vec![TypeSignature::Class(person)],
        );

        let lowered = lowering().lower(&sig).unwrap();
        assert_eq!(lowered.assemblies, vec![corlib(), user_assembly()]);
        assert_eq!(
            encode(&lowered.type_ref, &resolver()).unwrap(),
            format!("System.Collections.Generic.List`1[[App.Person, {USER}]], {MSCORLIB}")
        );
    }

    #[test]
    fn test_unsupported_shapes() {
        for sig in [
            TypeSignature::GenericParamType(0),
            TypeSignature::GenericParamMethod(1),
            TypeSignature::FnPtr,
            TypeSignature::SzArray(Box::new(TypeSignature::GenericParamType(0))),
        ] {
            assert!(matches!(
                lowering().lower(&sig),
                Err(Error::UnsupportedModifier(_))
            ));
        }
    }

    #[test]
    fn test_instantiating_non_generic_fails() {
        let sig = TypeSignature::GenericInst(
            Box::new(TypeSignature::String),
            vec![TypeSignature::I4],
        );
        assert!(matches!(
            lowering().lower(&sig),
            Err(Error::MalformedTypeRef(_))
        ));
    }
}
