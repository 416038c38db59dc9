//! Property tests for the encoder and parser.

use proptest::prelude::*;
use typeident::{metadata::typename::escape, prelude::*};

const MSCORLIB: &str =
    "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";
const APP: &str = "App, Version=1.2.3.4, Culture=en-US, PublicKeyToken=0123456789abcdef";

fn resolver() -> AssemblyCache {
    let cache = AssemblyCache::new();
    cache.register_display_name(MSCORLIB).unwrap();
    cache.register_display_name(APP).unwrap();
    cache
}

fn assembly() -> impl Strategy<Value = AssemblyIdentity> {
    prop_oneof![
        Just(AssemblyIdentity::parse(MSCORLIB).unwrap()),
        Just(AssemblyIdentity::parse(APP).unwrap()),
    ]
}

fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z_<][A-Za-z0-9_<>,+*&\\[\\]\\\\]{0,10}"
}

fn namespace() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[A-Z][a-z]{1,6}(\\.[A-Z][a-z]{1,6}){0,2}"]
}

fn array_modifier() -> impl Strategy<Value = TypeModifier> {
    prop_oneof![
        Just(TypeModifier::Array(1)),
        (1u32..=4).prop_map(TypeModifier::MultiArray),
    ]
}

fn leaf() -> impl Strategy<Value = TypeRef> {
    (
        namespace(),
        proptest::collection::vec(identifier(), 0..3),
        identifier(),
        assembly(),
        proptest::collection::vec(array_modifier(), 0..3),
    )
        .prop_map(|(namespace, enclosing, name, assembly, modifiers)| {
            TypeRef::new(namespace, enclosing, name, assembly, 0, Vec::new(), modifiers).unwrap()
        })
}

fn type_ref() -> impl Strategy<Value = TypeRef> {
    leaf().prop_recursive(3, 16, 3, |inner| {
        (
            namespace(),
            identifier(),
            assembly(),
            proptest::collection::vec(inner, 1..4),
            proptest::collection::vec(array_modifier(), 0..2),
            any::<bool>(),
        )
            .prop_map(|(namespace, name, assembly, args, modifiers, marker)| {
                let arity = args.len() as u32;
                TypeRef::new(namespace, Vec::new(), name, assembly, arity, args, modifiers)
                    .unwrap()
                    .with_arity_marker(marker)
            })
    })
}

proptest! {
    #[test]
    fn encoding_is_deterministic(ty in type_ref()) {
        let encoder = TypeNameEncoder::new(resolver());
        prop_assert_eq!(encoder.encode(&ty).unwrap(), encoder.encode(&ty).unwrap());
    }

    #[test]
    fn parse_inverts_encode(ty in type_ref()) {
        let text = encode(&ty, &resolver()).unwrap();
        let parsed = parse_qualified_name(&text).unwrap();
        prop_assert_eq!(parsed, ty);
    }

    #[test]
    fn brackets_balance(ty in type_ref()) {
        let text = encode(&ty, &resolver()).unwrap();
        let unescaped: String = {
            let mut out = String::new();
            let mut chars = text.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    chars.next();
                } else {
                    out.push(c);
                }
            }
            out
        };
        prop_assert_eq!(unescaped.matches('[').count(), unescaped.matches(']').count());
    }

    #[test]
    fn escaping_prefixes_only_reserved_characters(ident in "\\PC{0,24}") {
        let escaped = escape(&ident);
        let mut expected = String::new();
        for c in ident.chars() {
            if ",+*&[]\\".contains(c) {
                expected.push('\\');
            }
            expected.push(c);
        }
        prop_assert_eq!(&*escaped, expected.as_str());
    }
}
