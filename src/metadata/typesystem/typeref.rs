//! Immutable description of one type occurrence read from metadata.

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        typesystem::{TypeModifier, MAX_ARRAY_RANK},
    },
    Error, Result,
};

/// Identity of one type occurrence as seen in bytecode metadata.
///
/// A `TypeRef` is a self-contained tree: generic arguments are owned `TypeRef` nodes and the
/// defining assembly is held by value. It is validated on construction and never mutated
/// afterwards; every transformation returns a new instance.
///
/// Equality and hashing cover all fields. Generic arguments compare positionally, so
/// `Dictionary<String, Object>` and `Dictionary<Object, String>` differ.
///
/// # Structure
///
/// - `namespace` - possibly empty; nested types carry the namespace of their outermost type
/// - `enclosing` - metadata names of the declaring types, outermost first
/// - `name` - the simple name, without the `` `N `` arity marker
/// - `arity` - number of generic parameters, 0 for non-generic types
/// - `arity_marker` - whether the metadata name carries `` `N ``; a nested type that only
///   inherits the parameters of its declaring type (`List<T>.Enumerator`) does not
/// - `generic_args` - empty for an open definition, otherwise exactly `arity` entries
/// - `modifiers` - arrays, pointers and by-refs, innermost first
///
/// # Examples
///
/// ```rust
/// use typeident::metadata::{identity::AssemblyIdentity, typesystem::TypeRef};
///
/// let mscorlib = AssemblyIdentity::named("mscorlib");
/// let string = TypeRef::simple("System", "String", mscorlib.clone())?;
/// let object = TypeRef::simple("System", "Object", mscorlib.clone())?;
///
/// let open = TypeRef::generic_definition_of("System.Collections.Generic", "Dictionary", 2, mscorlib)?;
/// let closed = open.instantiate(vec![string, object])?;
/// assert!(open.is_open_generic());
/// assert!(!closed.is_open_generic());
/// # Ok::<(), typeident::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    namespace: String,
    enclosing: Vec<String>,
    name: String,
    assembly: AssemblyIdentity,
    arity: u32,
    arity_marker: bool,
    generic_args: Vec<TypeRef>,
    modifiers: Vec<TypeModifier>,
}

impl TypeRef {
    /// Create a new `TypeRef`, validating its structural invariants
    ///
    /// ## Arguments
    /// * 'namespace'    - The namespace, empty for the global namespace
    /// * 'enclosing'    - Declaring type names, outermost first
    /// * 'name'         - The simple name without arity marker
    /// * 'assembly'     - The assembly reference the metadata names as the type's definer
    /// * 'arity'        - The number of generic parameters
    /// * 'generic_args' - Empty for an open definition, otherwise `arity` closed types
    /// * 'modifiers'    - Array, pointer and by-ref constructors, innermost first
    ///
    /// # Errors
    /// Returns [`Error::MalformedTypeRef`] if the argument count is neither 0 nor `arity`,
    /// an array rank lies outside `1..=32`, a name is empty, or an argument is itself an
    /// open generic definition.
    pub fn new(
        namespace: impl Into<String>,
        enclosing: Vec<String>,
        name: impl Into<String>,
        assembly: AssemblyIdentity,
        arity: u32,
        generic_args: Vec<TypeRef>,
        modifiers: Vec<TypeModifier>,
    ) -> Result<Self> {
        let type_ref = TypeRef {
            namespace: namespace.into(),
            enclosing,
            name: name.into(),
            assembly,
            arity,
            arity_marker: true,
            generic_args,
            modifiers: modifiers.into_iter().map(TypeModifier::normalized).collect(),
        };

        type_ref.validate()?;
        Ok(type_ref)
    }

    /// Create a non-generic, unmodified top-level type
    ///
    /// # Errors
    /// Returns [`Error::MalformedTypeRef`] if `name` is empty.
    pub fn simple(
        namespace: impl Into<String>,
        name: impl Into<String>,
        assembly: AssemblyIdentity,
    ) -> Result<Self> {
        Self::new(namespace, Vec::new(), name, assembly, 0, Vec::new(), Vec::new())
    }

    /// Create an open generic definition with `arity` unbound parameters
    ///
    /// # Errors
    /// Returns [`Error::MalformedTypeRef`] if `name` is empty.
    pub fn generic_definition_of(
        namespace: impl Into<String>,
        name: impl Into<String>,
        arity: u32,
        assembly: AssemblyIdentity,
    ) -> Result<Self> {
        Self::new(namespace, Vec::new(), name, assembly, arity, Vec::new(), Vec::new())
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::MalformedTypeRef("type name is empty".to_string()));
        }

        if let Some(index) = self.enclosing.iter().position(String::is_empty) {
            return Err(Error::MalformedTypeRef(format!(
                "enclosing type name {} of '{}' is empty",
                index, self.name
            )));
        }

        if !self.generic_args.is_empty() && self.generic_args.len() != self.arity as usize {
            return Err(Error::MalformedTypeRef(format!(
                "'{}' declares {} generic parameters but has {} arguments",
                self.name,
                self.arity,
                self.generic_args.len()
            )));
        }

        if let Some(open) = self.generic_args.iter().find(|arg| arg.is_open_generic()) {
            return Err(Error::MalformedTypeRef(format!(
                "open generic definition '{}' used as an argument of '{}'",
                open.name, self.name
            )));
        }

        for modifier in &self.modifiers {
            if let Some(rank) = modifier.rank() {
                if rank == 0 || rank > MAX_ARRAY_RANK {
                    return Err(Error::MalformedTypeRef(format!(
                        "array rank {} of '{}' is outside 1..={}",
                        rank, self.name, MAX_ARRAY_RANK
                    )));
                }
            }
        }

        Ok(())
    }

    /// The namespace, empty for the global namespace
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Declaring type names, outermost first
    #[must_use]
    pub fn enclosing(&self) -> &[String] {
        &self.enclosing
    }

    /// The simple name, without arity marker
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The assembly reference recorded in metadata for this type
    #[must_use]
    pub fn assembly(&self) -> &AssemblyIdentity {
        &self.assembly
    }

    /// Number of generic parameters
    #[must_use]
    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// Check if the metadata name ends in a `` `N `` marker for the arity
    #[must_use]
    pub fn has_arity_marker(&self) -> bool {
        self.arity > 0 && self.arity_marker
    }

    /// The name as stored in metadata, e.g. ``List`1`` or `Enumerator`
    #[must_use]
    pub fn metadata_name(&self) -> String {
        if self.has_arity_marker() {
            format!("{}`{}", self.name, self.arity)
        } else {
            self.name.clone()
        }
    }

    /// Set whether the metadata name carries the arity marker
    ///
    /// Generic types carry one by default. Clear it for a nested type whose generic
    /// parameters all belong to its declaring type, such as `List<T>.Enumerator`. Has no
    /// effect on non-generic types.
    #[must_use]
    pub fn with_arity_marker(mut self, marker: bool) -> TypeRef {
        self.arity_marker = marker || self.arity == 0;
        self
    }

    /// Bound generic arguments, empty for open definitions and non-generic types
    #[must_use]
    pub fn generic_args(&self) -> &[TypeRef] {
        &self.generic_args
    }

    /// Modifiers, innermost first
    #[must_use]
    pub fn modifiers(&self) -> &[TypeModifier] {
        &self.modifiers
    }

    /// Check if this type declares generic parameters
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.arity > 0
    }

    /// Check if this is a generic type definition with unbound parameters
    #[must_use]
    pub fn is_open_generic(&self) -> bool {
        self.arity > 0 && self.generic_args.is_empty()
    }

    /// Check if this is a generic type with all parameters bound
    #[must_use]
    pub fn is_closed_generic(&self) -> bool {
        self.arity > 0 && !self.generic_args.is_empty()
    }

    /// Check if this type is declared inside another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.enclosing.is_empty()
    }

    /// Bind the parameters of an open generic definition
    ///
    /// ## Arguments
    /// * 'args' - Exactly `arity` closed type arguments
    ///
    /// # Errors
    /// Returns [`Error::MalformedTypeRef`] if this type is not an open definition or the
    /// argument count is wrong, and [`Error::UnsupportedModifier`] if the definition carries
    /// modifiers.
    pub fn instantiate(&self, args: Vec<TypeRef>) -> Result<TypeRef> {
        if !self.is_open_generic() {
            return Err(Error::MalformedTypeRef(format!(
                "'{}' is not an open generic definition",
                self.name
            )));
        }

        if !self.modifiers.is_empty() {
            return Err(Error::UnsupportedModifier(format!(
                "cannot instantiate modified generic definition '{}'",
                self.name
            )));
        }

        if args.len() != self.arity as usize {
            return Err(Error::MalformedTypeRef(format!(
                "'{}' declares {} generic parameters but {} arguments were supplied",
                self.name,
                self.arity,
                args.len()
            )));
        }

        let mut closed = self.clone();
        closed.generic_args = args;
        closed.validate()?;
        Ok(closed)
    }

    /// Wrap this type in one more modifier
    ///
    /// # Errors
    /// Returns [`Error::MalformedTypeRef`] for an array rank outside `1..=32`.
    pub fn with_modifier(&self, modifier: TypeModifier) -> Result<TypeRef> {
        let mut wrapped = self.clone();
        wrapped.modifiers.push(modifier.normalized());
        wrapped.validate()?;
        Ok(wrapped)
    }

    /// The element type: this type with all modifiers removed
    #[must_use]
    pub fn element_type(&self) -> TypeRef {
        let mut element = self.clone();
        element.modifiers.clear();
        element
    }

    /// The open generic definition of this type, without arguments or modifiers
    #[must_use]
    pub fn generic_definition(&self) -> TypeRef {
        let mut definition = self.element_type();
        definition.generic_args.clear();
        definition
    }

    /// Every distinct assembly reference this type touches, first-seen order
    ///
    /// Includes the assemblies of all generic arguments, recursively. These are the
    /// references an encoder has to resolve to qualify the type.
    #[must_use]
    pub fn referenced_assemblies(&self) -> Vec<&AssemblyIdentity> {
        let mut seen = Vec::new();
        self.collect_assemblies(&mut seen);
        seen
    }

    fn collect_assemblies<'a>(&'a self, seen: &mut Vec<&'a AssemblyIdentity>) {
        if !seen.contains(&&self.assembly) {
            seen.push(&self.assembly);
        }
        for arg in &self.generic_args {
            arg.collect_assemblies(seen);
        }
    }
}
