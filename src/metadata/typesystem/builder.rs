//! Builder for [`TypeRef`] graphs.
//!
//! This module provides the [`TypeRefBuilder`] struct, a fluent API for assembling type
//! references the way a metadata reader encounters them: a `TypeRef`/`TypeDef` row with a
//! namespace and a metadata name such as ``Dictionary`2``, an optional chain of declaring
//! types, then instantiation arguments and array, pointer or by-ref wrappers taken from a
//! signature.
//!
//! # Example
//!
//! ```rust
//! use typeident::metadata::{
//!     identity::AssemblyIdentity,
//!     typesystem::{TypeModifier, TypeRefBuilder},
//! };
//!
//! let mscorlib = AssemblyIdentity::named("mscorlib");
//! let string = TypeRefBuilder::new(mscorlib.clone())
//!     .namespace("System")
//!     .name("String")
//!     .build()?;
//!
//! let list_of_strings = TypeRefBuilder::new(mscorlib)
//!     .namespace("System.Collections.Generic")
//!     .metadata_name("List`1")
//!     .arg(string)
//!     .modifier(TypeModifier::Array(1))
//!     .build()?;
//!
//! assert_eq!(list_of_strings.arity(), 1);
//! # Ok::<(), typeident::Error>(())
//! ```

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        typesystem::{TypeModifier, TypeRef},
    },
    Result,
};

/// Provides a fluent API for building type references
pub struct TypeRefBuilder {
    assembly: AssemblyIdentity,
    namespace: String,
    enclosing: Vec<String>,
    name: String,
    arity: Option<u32>,
    arity_marker: bool,
    args: Vec<TypeRef>,
    modifiers: Vec<TypeModifier>,
}

impl TypeRefBuilder {
    /// Create a new builder for a type defined in `assembly`
    ///
    /// ## Arguments
    /// * 'assembly' - The assembly reference recorded for the type
    #[must_use]
    pub fn new(assembly: AssemblyIdentity) -> Self {
        TypeRefBuilder {
            assembly,
            namespace: String::new(),
            enclosing: Vec::new(),
            name: String::new(),
            arity: None,
            arity_marker: true,
            args: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    /// Set the namespace
    ///
    /// ## Arguments
    /// * 'namespace' - Namespace of the outermost declaring type
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Add a declaring type; call from the outermost type inwards
    ///
    /// ## Arguments
    /// * 'name' - Metadata name of the declaring type, including any arity marker
    #[must_use]
    pub fn nested_in(mut self, name: impl Into<String>) -> Self {
        self.enclosing.push(name.into());
        self
    }

    /// Set the simple name, without arity marker; generic types get one when encoded
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.arity_marker = true;
        self
    }

    /// Set name and arity from a metadata name such as ``Dictionary`2``
    ///
    /// A trailing `` `N `` marker with a decimal `N` is split off as the arity. Names without
    /// a valid marker are taken verbatim and encode without one, even when an explicit
    /// [`arity`](Self::arity) or arguments make the type generic; this is how a nested type
    /// that inherits its declaring type's parameters is named.
    #[must_use]
    pub fn metadata_name(mut self, metadata_name: &str) -> Self {
        let (name, arity) = split_arity(metadata_name);
        self.name = name.to_string();
        self.arity_marker = arity.is_some();
        if let Some(arity) = arity {
            self.arity = Some(arity);
        }
        self
    }

    /// Declare the generic arity explicitly
    #[must_use]
    pub fn arity(mut self, arity: u32) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Append a generic argument
    #[must_use]
    pub fn arg(mut self, arg: TypeRef) -> Self {
        self.args.push(arg);
        self
    }

    /// Append several generic arguments
    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = TypeRef>) -> Self {
        self.args.extend(args);
        self
    }

    /// Wrap the type in a modifier; call from the innermost modifier outwards
    #[must_use]
    pub fn modifier(mut self, modifier: TypeModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Finish the type reference.
    ///
    /// Without an explicit arity, the number of supplied arguments is used.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedTypeRef`] if the collected parts violate a
    /// [`TypeRef`] invariant.
    pub fn build(self) -> Result<TypeRef> {
        let arity = match self.arity {
            Some(arity) => arity,
            None => u32::try_from(self.args.len()).map_err(|_| {
                crate::Error::MalformedTypeRef(format!(
                    "'{}' has too many generic arguments",
                    self.name
                ))
            })?,
        };
        let arity_marker = self.arity_marker;

        TypeRef::new(
            self.namespace,
            self.enclosing,
            self.name,
            self.assembly,
            arity,
            self.args,
            self.modifiers,
        )
        .map(|type_ref| type_ref.with_arity_marker(arity_marker))
    }
}

/// Split a metadata name into its simple name and the arity of a trailing `` `N `` marker
#[must_use]
pub fn split_arity(metadata_name: &str) -> (&str, Option<u32>) {
    if let Some((name, digits)) = metadata_name.rsplit_once('`') {
        if !name.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(arity) = digits.parse::<u32>() {
                return (name, Some(arity));
            }
        }
    }

    (metadata_name, None)
}
