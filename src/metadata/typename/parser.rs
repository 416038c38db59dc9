//! Parser for assembly-qualified type names.
//!
//! Accepts every shape [`super::TypeNameEncoder`] emits, so that encoding a parsed name yields
//! the input again. Generic arguments must be bracketed and fully qualified, which is the only
//! form the runtime produces for `AssemblyQualifiedName`.

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        typename::{escaping::is_reserved, MAX_NESTING_DEPTH},
        typesystem::{split_arity, TypeModifier, TypeRef},
    },
    Error, Result,
};

/// Parse an assembly-qualified type name into a [`TypeRef`]
///
/// The assembly qualifier of the outer type and of every generic argument is parsed into an
/// [`AssemblyIdentity`] with [`AssemblyIdentity::parse`].
///
/// # Errors
/// - [`Error::Malformed`] if the text does not follow the qualified-name grammar, including a
///   missing assembly qualifier
/// - [`Error::MalformedTypeRef`] if the parsed parts violate a [`TypeRef`] invariant, such as
///   an argument count that differs from the arity marker
/// - [`Error::RecursionLimit`] if generic arguments nest deeper than [`MAX_NESTING_DEPTH`]
///
/// # Examples
///
/// ```rust
/// use typeident::metadata::typename::parse_qualified_name;
///
/// let list = parse_qualified_name(
///     "System.Collections.Generic.List`1[[System.String, mscorlib]], mscorlib",
/// )?;
/// assert_eq!(list.name(), "List");
/// assert_eq!(list.generic_args()[0].name(), "String");
/// # Ok::<(), typeident::Error>(())
/// ```
pub fn parse_qualified_name(text: &str) -> Result<TypeRef> {
    let mut parser = NameParser::new(text);
    let type_ref = parser.qualified_type(0, None)?;

    if !parser.at_end() {
        return Err(malformed_error!(
            "Unexpected '{}' at offset {} of '{}'",
            parser.rest(),
            parser.pos,
            text
        ));
    }

    Ok(type_ref)
}

struct NameParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> NameParser<'a> {
    fn new(input: &'a str) -> Self {
        NameParser { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(malformed_error!(
                "Expected '{}' but found '{}' at offset {} of '{}'",
                expected,
                c,
                self.pos - c.len_utf8(),
                self.input
            )),
            None => Err(malformed_error!(
                "Expected '{}' but reached the end of '{}'",
                expected,
                self.input
            )),
        }
    }

    /// One identifier, unescaped; stops at the first unescaped reserved character
    fn identifier(&mut self) -> Result<String> {
        let mut ident = String::new();

        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                match self.bump() {
                    Some(escaped) => ident.push(escaped),
                    None => {
                        return Err(malformed_error!(
                            "Dangling escape at the end of '{}'",
                            self.input
                        ))
                    }
                }
            } else if is_reserved(c) {
                break;
            } else {
                ident.push(c);
                self.bump();
            }
        }

        if ident.is_empty() {
            return Err(malformed_error!(
                "Expected a type name at offset {} of '{}'",
                self.pos,
                self.input
            ));
        }

        Ok(ident)
    }

    /// `full-name ", " assembly`; the assembly text runs up to `terminator` or the end
    fn qualified_type(&mut self, depth: usize, terminator: Option<char>) -> Result<TypeRef> {
        if depth > MAX_NESTING_DEPTH {
            return Err(Error::RecursionLimit(MAX_NESTING_DEPTH));
        }

        let mut segments = vec![self.identifier()?];
        while self.peek() == Some('+') {
            self.bump();
            segments.push(self.identifier()?);
        }

        let (simple, marker) = match segments.pop() {
            Some(last) => {
                let (simple, marker) = split_arity(&last);
                (simple.to_string(), marker)
            }
            None => return Err(malformed_error!("Empty type name in '{}'", self.input)),
        };

        let (namespace, name, enclosing) = if segments.is_empty() {
            let (namespace, name) = split_namespace(&simple);
            (namespace.to_string(), name.to_string(), Vec::new())
        } else {
            let (namespace, outermost) = split_namespace(&segments[0]);
            let namespace = namespace.to_string();
            segments[0] = outermost.to_string();
            (namespace, simple, segments)
        };

        // an unmarked name with arguments inherits its parameters from a declaring type
        let generic_args = if self.peek() == Some('[') && self.peek_second() == Some('[') {
            self.generic_arguments(depth)?
        } else {
            Vec::new()
        };
        let arity = match marker {
            Some(arity) => arity,
            None => u32::try_from(generic_args.len()).map_err(|_| {
                malformed_error!("Too many generic arguments in '{}'", self.input)
            })?,
        };

        let modifiers = self.modifiers()?;

        self.expect(',')?;
        let assembly = self.assembly(terminator)?;

        TypeRef::new(
            namespace,
            enclosing,
            name,
            assembly,
            arity,
            generic_args,
            modifiers,
        )
        .map(|type_ref| type_ref.with_arity_marker(marker.is_some()))
    }

    fn generic_arguments(&mut self, depth: usize) -> Result<Vec<TypeRef>> {
        self.expect('[')?;

        let mut args = Vec::new();
        loop {
            self.expect('[')?;
            args.push(self.qualified_type(depth + 1, Some(']'))?);
            self.expect(']')?;

            match self.bump() {
                Some(',') => continue,
                Some(']') => break,
                _ => {
                    return Err(malformed_error!(
                        "Unterminated generic argument list in '{}'",
                        self.input
                    ))
                }
            }
        }

        Ok(args)
    }

    fn modifiers(&mut self) -> Result<Vec<TypeModifier>> {
        let mut modifiers = Vec::new();

        loop {
            match self.peek() {
                Some('*') => {
                    self.bump();
                    modifiers.push(TypeModifier::Pointer);
                }
                Some('&') => {
                    self.bump();
                    modifiers.push(TypeModifier::ByRef);
                }
                Some('[') => {
                    self.bump();
                    modifiers.push(self.array_suffix()?);
                }
                _ => return Ok(modifiers),
            }
        }
    }

    /// Remainder of an array suffix after its opening bracket
    fn array_suffix(&mut self) -> Result<TypeModifier> {
        match self.bump() {
            Some(']') => Ok(TypeModifier::Array(1)),
            Some('*') => {
                self.expect(']')?;
                Ok(TypeModifier::MultiArray(1))
            }
            Some(',') => {
                let mut rank = 2u32;
                loop {
                    match self.bump() {
                        Some(',') => rank = rank.saturating_add(1),
                        Some(']') => return Ok(TypeModifier::MultiArray(rank)),
                        _ => {
                            return Err(malformed_error!(
                                "Unterminated array suffix in '{}'",
                                self.input
                            ))
                        }
                    }
                }
            }
            _ => Err(malformed_error!(
                "Invalid array suffix at offset {} of '{}'",
                self.pos,
                self.input
            )),
        }
    }

    fn assembly(&mut self, terminator: Option<char>) -> Result<AssemblyIdentity> {
        self.skip_spaces();

        let rest = self.rest();
        let len = match terminator {
            Some(t) => rest.find(t).ok_or_else(|| {
                malformed_error!("Missing '{}' after assembly name in '{}'", t, self.input)
            })?,
            None => rest.len(),
        };

        let display_name = rest[..len].trim();
        self.pos += len;
        AssemblyIdentity::parse(display_name)
    }
}

/// Split at the last `.`; the namespace is empty when there is none
fn split_namespace(full: &str) -> (&str, &str) {
    match full.rsplit_once('.') {
        Some((namespace, name)) if !name.is_empty() => (namespace, name),
        _ => ("", full),
    }
}
