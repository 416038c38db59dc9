//! Assembly-qualified name encoder.
//!
//! # Grammar
//!
//! ```text
//! qualified        := full-name ", " assembly-qualifier
//! full-name        := namespace-prefix nested-name generic-suffix modifier-suffix
//! namespace-prefix := "" | namespace "."
//! nested-name      := simpleName | enclosing_1 "+" ... "+" simpleName
//! generic-suffix   := arity-marker arguments
//! arity-marker     := "" | "`" arity
//! arguments        := "" | "[" "[" qualified "]" ("," "[" qualified "]")* "]"
//! modifier-suffix  := ("[]" | "[*]" | "[" ","* "]" | "*" | "&")*
//! assembly-qualifier := Name ", Version=" v ", Culture=" c ", PublicKeyToken=" t
//! ```
//!
//! The arity marker appears only when the type's metadata name carries one; a nested type
//! that inherits its declaring type's parameters prints its arguments straight after the
//! name. Identifiers escape `, + * & [ ] \` with a backslash. Generic arguments are always fully
//! qualified, and so is the top-level result: no rule suppresses the assembly qualifier.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        typename::escaping::escape_into,
        typesystem::{TypeModifier, TypeRef},
    },
    project::AssemblyResolver,
    Error, Result,
};

/// Default limit for generic arguments nested inside generic arguments.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Produces the runtime's assembly-qualified name for [`TypeRef`] graphs.
///
/// The encoder holds no mutable state. Each call resolves the assemblies it needs through
/// the resolver, at most once per distinct reference, and returns either the complete
/// string or an error; a partial name is never returned.
///
/// # Examples
///
/// ```rust
/// use typeident::{
///     metadata::{identity::AssemblyIdentity, typename::TypeNameEncoder, typesystem::TypeRef},
///     project::AssemblyCache,
/// };
///
/// let cache = AssemblyCache::new();
/// cache.register_display_name(
///     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
/// )?;
///
/// let boolean = TypeRef::simple("System", "Boolean", AssemblyIdentity::named("mscorlib"))?;
/// let encoder = TypeNameEncoder::new(&cache);
/// assert_eq!(
///     encoder.encode(&boolean)?,
///     "System.Boolean, mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
/// );
/// # Ok::<(), typeident::Error>(())
/// ```
pub struct TypeNameEncoder<R> {
    resolver: R,
    max_depth: usize,
}

impl<R: AssemblyResolver> TypeNameEncoder<R> {
    /// Create an encoder resolving assemblies through `resolver`
    pub fn new(resolver: R) -> Self {
        TypeNameEncoder {
            resolver,
            max_depth: MAX_NESTING_DEPTH,
        }
    }

    /// Set the maximum generic argument nesting depth
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The resolver used by this encoder
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Encode the assembly-qualified name of `type_ref`
    ///
    /// # Errors
    /// - [`Error::UnresolvedAssembly`] if any referenced assembly cannot be resolved
    /// - [`Error::UnsupportedModifier`] for a by-ref that is not outermost, a modified open
    ///   generic definition, or a pointer or by-ref used as a generic argument
    /// - [`Error::RecursionLimit`] if generic arguments nest deeper than the limit
    pub fn encode(&self, type_ref: &TypeRef) -> Result<String> {
        let mut session = EncodeSession::new(&self.resolver, self.max_depth);
        let mut out = String::with_capacity(128);
        session.write_qualified(type_ref, &mut out, 0)?;
        Ok(out)
    }

    /// Encode the full name of `type_ref`: the qualified name without the outer assembly
    /// qualifier. Generic arguments are still fully qualified.
    ///
    /// # Errors
    /// Same as [`encode`](Self::encode).
    pub fn full_name(&self, type_ref: &TypeRef) -> Result<String> {
        let mut session = EncodeSession::new(&self.resolver, self.max_depth);
        let mut out = String::with_capacity(96);
        session.write_full_name(type_ref, &mut out, 0)?;
        Ok(out)
    }

    /// Encode many types in parallel, one result per input in input order
    ///
    /// Failures are reported per type; the caller decides whether one failure aborts the
    /// batch.
    pub fn encode_all(&self, types: &[TypeRef]) -> Vec<Result<String>> {
        types.par_iter().map(|t| self.encode(t)).collect()
    }
}

/// Encode the assembly-qualified name of `type_ref` with a one-off encoder
///
/// # Errors
/// See [`TypeNameEncoder::encode`].
pub fn encode(type_ref: &TypeRef, resolver: &impl AssemblyResolver) -> Result<String> {
    TypeNameEncoder::new(resolver).encode(type_ref)
}

/// State of one `encode` call: memoized assembly qualifiers
struct EncodeSession<'a, R> {
    resolver: &'a R,
    max_depth: usize,
    qualifiers: HashMap<&'a AssemblyIdentity, String>,
}

impl<'a, R: AssemblyResolver> EncodeSession<'a, R> {
    fn new(resolver: &'a R, max_depth: usize) -> Self {
        EncodeSession {
            resolver,
            max_depth,
            qualifiers: HashMap::new(),
        }
    }

    fn qualifier(&mut self, reference: &'a AssemblyIdentity) -> Result<&str> {
        if !self.qualifiers.contains_key(reference) {
            let identity = self.resolver.resolve(reference)?;
            self.qualifiers.insert(reference, identity.display_name());
        }

        self.qualifiers
            .get(reference)
            .map(String::as_str)
            .ok_or_else(|| Error::UnresolvedAssembly(reference.name.clone()))
    }

    fn write_qualified(
        &mut self,
        type_ref: &'a TypeRef,
        out: &mut String,
        depth: usize,
    ) -> Result<()> {
        // resolve first so an unknown assembly fails before any text is produced
        self.qualifier(type_ref.assembly())?;
        self.write_full_name(type_ref, out, depth)?;

        out.push_str(", ");
        out.push_str(self.qualifier(type_ref.assembly())?);
        Ok(())
    }

    fn write_full_name(
        &mut self,
        type_ref: &'a TypeRef,
        out: &mut String,
        depth: usize,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::RecursionLimit(self.max_depth));
        }

        check_modifiers(type_ref)?;

        if !type_ref.namespace().is_empty() {
            escape_into(out, type_ref.namespace());
            out.push('.');
        }

        for enclosing in type_ref.enclosing() {
            escape_into(out, enclosing);
            out.push('+');
        }

        escape_into(out, type_ref.name());

        if type_ref.has_arity_marker() {
            out.push('`');
            out.push_str(&type_ref.arity().to_string());
        }

        if type_ref.is_closed_generic() {
            out.push('[');
            for (i, arg) in type_ref.generic_args().iter().enumerate() {
                check_argument(type_ref, arg)?;
                if i > 0 {
                    out.push(',');
                }
                out.push('[');
                self.write_qualified(arg, out, depth + 1)?;
                out.push(']');
            }
            out.push(']');
        }

        for modifier in type_ref.modifiers() {
            out.push_str(&modifier.to_string());
        }

        Ok(())
    }
}

fn check_modifiers(type_ref: &TypeRef) -> Result<()> {
    let modifiers = type_ref.modifiers();

    if type_ref.is_open_generic() && !modifiers.is_empty() {
        return Err(Error::UnsupportedModifier(format!(
            "open generic definition '{}' cannot carry modifiers",
            type_ref.name()
        )));
    }

    if let Some(position) = modifiers.iter().position(|m| *m == TypeModifier::ByRef) {
        if position + 1 != modifiers.len() {
            return Err(Error::UnsupportedModifier(format!(
                "by-ref of '{}' must be the outermost modifier",
                type_ref.name()
            )));
        }
    }

    Ok(())
}

fn check_argument(owner: &TypeRef, arg: &TypeRef) -> Result<()> {
    match arg.modifiers().last() {
        Some(modifier @ (TypeModifier::Pointer | TypeModifier::ByRef)) => {
            Err(Error::UnsupportedModifier(format!(
                "'{}{}' cannot be a generic argument of '{}'",
                arg.name(),
                modifier,
                owner.name()
            )))
        }
        _ => Ok(()),
    }
}
