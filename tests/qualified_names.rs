//! Integration tests for runtime-exact assembly-qualified names.
//!
//! Every expected string below is what `typeof(T).AssemblyQualifiedName` reports on the .NET
//! Framework 4.x runtime for the corresponding C# type.

use typeident::{prelude::*, Result};

const MSCORLIB: &str =
    "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";
const TESTS: &str = "Mono.Cecil.Tests, Version=0.10.0.0, Culture=neutral, PublicKeyToken=null";

fn resolver() -> Result<AssemblyCache> {
    let cache = AssemblyCache::new();
    cache.register_display_name(MSCORLIB)?;
    cache.register_display_name(TESTS)?;
    Ok(cache)
}

fn corlib() -> AssemblyIdentity {
    AssemblyIdentity::named("mscorlib")
}

fn tests_assembly() -> AssemblyIdentity {
    AssemblyIdentity::named("Mono.Cecil.Tests")
}

fn system(name: &str) -> Result<TypeRef> {
    TypeRef::simple("System", name, corlib())
}

fn dictionary_of_string_object() -> Result<TypeRef> {
    TypeRefBuilder::new(corlib())
        .namespace("System.Collections.Generic")
        .metadata_name("Dictionary`2")
        .arg(system("String")?)
        .arg(system("Object")?)
        .build()
}

/// `typeof(bool)`
#[test]
fn test_primitive_value_type() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    assert_eq!(
        encoder.encode(&system("Boolean")?)?,
        format!("System.Boolean, {MSCORLIB}")
    );
    Ok(())
}

/// `typeof(string)`
#[test]
fn test_primitive_reference_type() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    assert_eq!(
        encoder.encode(&system("String")?)?,
        format!("System.String, {MSCORLIB}")
    );
    Ok(())
}

/// `typeof(Mono.Cecil.Tests.TestCecilExtensions)`
#[test]
fn test_user_class() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let user = TypeRef::simple("Mono.Cecil.Tests", "TestCecilExtensions", tests_assembly())?;
    assert_eq!(
        encoder.encode(&user)?,
        format!("Mono.Cecil.Tests.TestCecilExtensions, {TESTS}")
    );
    Ok(())
}

/// `typeof(Dictionary<string, object>)`
#[test]
fn test_closed_generic() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    assert_eq!(
        encoder.encode(&dictionary_of_string_object()?)?,
        format!(
            "System.Collections.Generic.Dictionary`2[[System.String, {MSCORLIB}],[System.Object, {MSCORLIB}]], {MSCORLIB}"
        )
    );
    Ok(())
}

/// `typeof(Dictionary<,>)`
#[test]
fn test_open_generic() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let open =
        TypeRef::generic_definition_of("System.Collections.Generic", "Dictionary", 2, corlib())?;
    assert_eq!(
        encoder.encode(&open)?,
        format!("System.Collections.Generic.Dictionary`2, {MSCORLIB}")
    );
    Ok(())
}

/// `typeof(TestCecilExtensions.Nested)`
#[test]
fn test_nested_type() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let nested = TypeRefBuilder::new(tests_assembly())
        .namespace("Mono.Cecil.Tests")
        .nested_in("TestCecilExtensions")
        .name("Nested")
        .build()?;
    assert_eq!(
        encoder.encode(&nested)?,
        format!("Mono.Cecil.Tests.TestCecilExtensions+Nested, {TESTS}")
    );
    Ok(())
}

/// `typeof(TestCecilExtensions[])`
#[test]
fn test_array_of_user_class() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let array = TypeRef::simple("Mono.Cecil.Tests", "TestCecilExtensions", tests_assembly())?
        .with_modifier(TypeModifier::Array(1))?;
    assert_eq!(
        encoder.encode(&array)?,
        format!("Mono.Cecil.Tests.TestCecilExtensions[], {TESTS}")
    );
    Ok(())
}

/// `typeof(Dictionary<string, object>[])`
#[test]
fn test_array_of_closed_generic() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let array = dictionary_of_string_object()?.with_modifier(TypeModifier::Array(1))?;
    assert_eq!(
        encoder.encode(&array)?,
        format!(
            "System.Collections.Generic.Dictionary`2[[System.String, {MSCORLIB}],[System.Object, {MSCORLIB}]][], {MSCORLIB}"
        )
    );
    Ok(())
}

/// `typeof(bool?)`
#[test]
fn test_nullable_primitive() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let nullable = TypeRef::generic_definition_of("System", "Nullable", 1, corlib())?
        .instantiate(vec![system("Boolean")?])?;
    assert_eq!(
        encoder.encode(&nullable)?,
        format!("System.Nullable`1[[System.Boolean, {MSCORLIB}]], {MSCORLIB}")
    );
    Ok(())
}

fn list_enumerator_definition() -> Result<TypeRef> {
    TypeRefBuilder::new(corlib())
        .namespace("System.Collections.Generic")
        .nested_in("List`1")
        .metadata_name("Enumerator")
        .arity(1)
        .build()
}

/// `typeof(List<int>.Enumerator)`
#[test]
fn test_nested_type_inheriting_generic_parameters() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let expected = format!(
        "System.Collections.Generic.List`1+Enumerator[[System.Int32, {MSCORLIB}]], {MSCORLIB}"
    );

    let enumerator = list_enumerator_definition()?.instantiate(vec![system("Int32")?])?;
    assert_eq!(encoder.encode(&enumerator)?, expected);

    let parsed = parse_qualified_name(&expected)?;
    assert_eq!(parsed, enumerator);
    assert_eq!(encoder.encode(&parsed)?, expected);

    // VALUETYPE List`1/Enumerator<int>, the definition at TypeRef row 6
    let blob = [0x15, 0x11, 0x19, 0x01, 0x08];
    let signature = decode_type_signature(&blob, |token| match token {
        0x0100_0006 => list_enumerator_definition(),
        _ => Err(Error::UnresolvedAssembly(format!("{token:08X}"))),
    })?;
    let lowered = SignatureLowering::new(corlib()).lower(&signature)?;
    assert_eq!(encoder.encode(&lowered.type_ref)?, expected);
    Ok(())
}

#[test]
fn test_encoding_is_idempotent() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let ty = dictionary_of_string_object()?;
    assert_eq!(encoder.encode(&ty)?, encoder.encode(&ty)?);
    Ok(())
}

/// `List<Dictionary<string, List<bool>>>`
#[test]
fn test_nested_generic_arguments() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let list = TypeRef::generic_definition_of("System.Collections.Generic", "List", 1, corlib())?;
    let dictionary =
        TypeRef::generic_definition_of("System.Collections.Generic", "Dictionary", 2, corlib())?;

    let inner = list.instantiate(vec![system("Boolean")?])?;
    let middle = dictionary.instantiate(vec![system("String")?, inner])?;
    let outer = list.instantiate(vec![middle])?;

    let name = encoder.encode(&outer)?;
    assert_eq!(
        name,
        format!(
            "System.Collections.Generic.List`1[[System.Collections.Generic.Dictionary`2[[System.String, {MSCORLIB}],[System.Collections.Generic.List`1[[System.Boolean, {MSCORLIB}]], {MSCORLIB}]], {MSCORLIB}]], {MSCORLIB}"
        )
    );
    assert_eq!(name.matches('[').count(), name.matches(']').count());
    Ok(())
}

#[test]
fn test_partial_argument_lists_are_rejected() {
    for supplied in 1..4 {
        let args = (0..supplied)
            .map(|_| system("Int32"))
            .collect::<Result<Vec<_>>>()
            .unwrap_or_default();
        let result = TypeRefBuilder::new(corlib())
            .namespace("System")
            .name("Tuple")
            .arity(5)
            .args(args)
            .build();
        assert!(matches!(result, Err(Error::MalformedTypeRef(_))));
    }
}

#[test]
fn test_unresolvable_assembly_fails_whole_encoding() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let missing = TypeRef::simple("Plugin", "Widget", AssemblyIdentity::named("Plugin"))?;
    let list = TypeRef::generic_definition_of("System.Collections.Generic", "List", 1, corlib())?
        .instantiate(vec![missing.clone()])?;

    for ty in [missing, list] {
        match encoder.encode(&ty) {
            Err(Error::UnresolvedAssembly(name)) => assert_eq!(name, "Plugin"),
            other => panic!("expected an unresolved assembly, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn test_signature_to_name() -> Result<()> {
    // Dictionary<string, object>[], with the TypeRef token of Dictionary`2 at row 5
    let blob = [0x1D, 0x15, 0x12, 0x15, 0x02, 0x0E, 0x1C];
    let signature = decode_type_signature(&blob, |token| match token {
        0x0100_0005 => {
            TypeRef::generic_definition_of("System.Collections.Generic", "Dictionary", 2, corlib())
        }
        _ => Err(Error::UnresolvedAssembly(format!("{token:08X}"))),
    })?;

    let lowered = SignatureLowering::new(corlib()).lower(&signature)?;
    assert_eq!(lowered.assemblies, vec![corlib()]);
    assert_eq!(
        encode(&lowered.type_ref, &resolver()?)?,
        format!(
            "System.Collections.Generic.Dictionary`2[[System.String, {MSCORLIB}],[System.Object, {MSCORLIB}]][], {MSCORLIB}"
        )
    );
    Ok(())
}

#[test]
fn test_parse_then_encode() -> Result<()> {
    let text = format!("Mono.Cecil.Tests.TestCecilExtensions+Nested[,], {TESTS}");
    let parsed = parse_qualified_name(&text)?;
    assert_eq!(parsed.enclosing(), ["TestCecilExtensions"]);
    assert_eq!(encode(&parsed, &resolver()?)?, text);
    Ok(())
}

#[test]
fn test_batch_encoding() -> Result<()> {
    let encoder = TypeNameEncoder::new(resolver()?);
    let types = vec![
        system("Boolean")?,
        dictionary_of_string_object()?,
        TypeRef::simple("Plugin", "Widget", AssemblyIdentity::named("Plugin"))?,
    ];

    let names = encoder.encode_all(&types);
    assert_eq!(names.len(), types.len());
    assert!(names[0].is_ok());
    assert!(names[1].is_ok());
    assert!(names[2].is_err());
    Ok(())
}
