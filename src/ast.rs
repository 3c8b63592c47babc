use serde::{Deserialize, Deserializer, Serialize};
use smol_str::SmolStr;
use std::fmt::{self, Display, Formatter, Write};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("{0} is not a valid graphql name")]
pub struct InvalidGraphQlName(pub String);

/// A validated GraphQL name. Construction goes through `Name::new` (or
/// deserialization), so a held `Name` is always spec-compliant.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(SmolStr);

impl Name {
    pub fn new(s: &str) -> Result<Name, InvalidGraphQlName> {
        Name::from_str(s)
    }

    pub fn get(&self) -> &SmolStr {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Name {
    type Err = InvalidGraphQlName;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if is_valid_graphql_name(s) {
            Ok(Name(SmolStr::new(s)))
        } else {
            Err(InvalidGraphQlName(s.into()))
        }
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if !is_valid_graphql_name(&s) {
            return Err(serde::de::Error::custom(format!(
                "{s} is not a valid graphql name"
            )));
        }
        Ok(Name(SmolStr::new(&s)))
    }
}

fn match_first(c: char) -> bool {
    c == '_' || c.is_ascii_uppercase() || c.is_ascii_lowercase()
}

fn match_body(c: char) -> bool {
    c == '_' || c.is_ascii_uppercase() || c.is_ascii_lowercase() || c.is_ascii_digit()
}

pub(crate) fn is_valid_graphql_name(text: &str) -> bool {
    if let Some(first) = text.chars().next() {
        let body = &text[first.len_utf8()..];
        match_first(first) && body.chars().all(match_body)
    } else {
        false
    }
}

// Macro to build a valid graphql name from a literal
#[macro_export]
macro_rules! mk_name {
    ($name:literal) => {
        $crate::ast::Name::new($name).unwrap()
    };
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeName(pub Name);

impl TypeName {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A GraphQL type reference, for example `String` or `[String!]!`.
///
/// [Reference](https://spec.graphql.org/June2018/#Type).
#[derive(Serialize, Deserialize, Hash, Debug, PartialEq, Eq, Clone)]
pub struct Type {
    /// The base type.
    pub base: BaseType,
    /// Whether the type is nullable.
    pub nullable: bool,
}

/// A GraphQL base type, for example `String` or `[String!]`. This does not
/// include whether the type is nullable; for that see [`Type`].
#[derive(Serialize, Deserialize, Hash, Debug, PartialEq, Eq, Clone)]
pub enum BaseType {
    /// A named type, such as `String`.
    Named(TypeName),
    /// A list type, such as `[String]`.
    List(Box<Type>),
}

impl Type {
    pub fn named(name: TypeName) -> Type {
        Type {
            base: BaseType::Named(name),
            nullable: true,
        }
    }

    pub fn named_non_null(name: TypeName) -> Type {
        Type {
            base: BaseType::Named(name),
            nullable: false,
        }
    }

    pub fn list_of(element_type: Type) -> Type {
        Type {
            base: BaseType::List(Box::new(element_type)),
            nullable: true,
        }
    }

    /// The named type underneath any list nesting.
    pub fn underlying_type(&self) -> &TypeName {
        match &self.base {
            BaseType::Named(n) => n,
            BaseType::List(ty) => ty.underlying_type(),
        }
    }

    pub fn is_list(&self) -> bool {
        match &self.base {
            BaseType::Named(_) => false,
            BaseType::List(_) => true,
        }
    }

    pub fn list_dimensions(&self) -> usize {
        match &self.base {
            BaseType::Named(_) => 0,
            BaseType::List(ty) => 1 + ty.list_dimensions(),
        }
    }

    // Built-in scalars, as nullable references. Metadata values may be
    // absent on any given instance, so minted fields are never non-null.

    pub fn int() -> Type {
        Type::named(TypeName(mk_name!("Int")))
    }

    pub fn float() -> Type {
        Type::named(TypeName(mk_name!("Float")))
    }

    pub fn boolean() -> Type {
        Type::named(TypeName(mk_name!("Boolean")))
    }

    pub fn string() -> Type {
        Type::named(TypeName(mk_name!("String")))
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.base.fmt(f)?;
        if !self.nullable {
            f.write_char('!')?;
        }
        Ok(())
    }
}

impl Display for BaseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => name.fmt(f),
            Self::List(ty) => write!(f, "[{ty}]"),
        }
    }
}
