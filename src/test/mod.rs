//! Fixtures shared by the unit tests.

use crate::{
    metadata::{identity::AssemblyIdentity, typesystem::TypeRef},
    project::AssemblyCache,
};

/// Display name of the .NET Framework core library
pub const MSCORLIB: &str =
    "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";

/// Display name of an unsigned user assembly
pub const USER: &str = "App, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null";

pub fn corlib() -> AssemblyIdentity {
    AssemblyIdentity::parse(MSCORLIB).unwrap()
}

pub fn user_assembly() -> AssemblyIdentity {
    AssemblyIdentity::parse(USER).unwrap()
}

pub fn string_type() -> TypeRef {
    TypeRef::simple("System", "String", corlib()).unwrap()
}

pub fn object_type() -> TypeRef {
    TypeRef::simple("System", "Object", corlib()).unwrap()
}

pub fn boolean_type() -> TypeRef {
    TypeRef::simple("System", "Boolean", corlib()).unwrap()
}

/// `Dictionary<String, Object>`
pub fn dictionary() -> TypeRef {
    TypeRef::generic_definition_of("System.Collections.Generic", "Dictionary", 2, corlib())
        .unwrap()
        .instantiate(vec![string_type(), object_type()])
        .unwrap()
}

/// Cache knowing `mscorlib` and `App`
pub fn resolver() -> AssemblyCache {
    let cache = AssemblyCache::new();
    cache.register(corlib());
    cache.register(user_assembly());
    cache
}
