//! The metadata model supplied by the host content-management system, and
//! the collaborator traits through which it is consulted.
//!
//! Nothing in here is owned by this crate at runtime: the registry, the
//! object-type enumeration and the value accessors all live in the host.
//! They are passed in as explicit read-only dependencies so the augmenter
//! stays testable in isolation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smol_str::SmolStr;
use std::fmt::{self, Display, Formatter};
use strum_macros::Display;

use crate::ast;

/// The fixed object-type key under which user metadata is registered.
pub const USER_OBJECT_TYPE: &str = "user";

/// Identifier for a schema-exposed object type: a content-item kind, a
/// taxonomy kind, or the fixed literal `"user"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectTypeKey(SmolStr);

impl ObjectTypeKey {
    pub fn new(key: &str) -> ObjectTypeKey {
        ObjectTypeKey(SmolStr::new(key))
    }

    pub fn user() -> ObjectTypeKey {
        ObjectTypeKey(SmolStr::new(USER_OBJECT_TYPE))
    }

    pub fn is_user(&self) -> bool {
        self.0 == USER_OBJECT_TYPE
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ObjectTypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw key under which a metadata value is registered. Unlike [`ast::Name`]
/// this is unvalidated registry input; it is only minted into a field name
/// once the augmenter decides to expose it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetaKey(SmolStr);

impl MetaKey {
    pub fn new(key: &str) -> MetaKey {
        MetaKey(SmolStr::new(key))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for MetaKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The declared value type of a registered metadata key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Display)]
pub enum MetaValueKind {
    Integer,
    Number,
    Boolean,
    String,
    /// A kind name outside the built-in scalar set. Mapped through the
    /// type-override table, falling back to `String`.
    Other(SmolStr),
    /// The registry supplied a fully formed schema type instead of a
    /// scalar-kind name. Used unchanged.
    Resolved(ast::Type),
}

/// One registered metadata key's declaration, keyed by [`MetaKey`] in the
/// registry result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MetaDescriptor {
    pub value_kind: MetaValueKind,
    /// Single value vs. collection of values under the same key.
    pub single: bool,
    /// Whether the key is exposed through public APIs at all.
    pub show_in_rest: bool,
    pub description: Option<String>,
}

/// One entry of the host's object-type enumeration. A registration may carry
/// an alternate externally facing name; when present, that name is the
/// discriminant under which the type's field set is published, while `key`
/// remains the identifier used for metadata lookups.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistration {
    pub key: ObjectTypeKey,
    pub graphql_name: Option<ObjectTypeKey>,
}

impl TypeRegistration {
    pub fn new(key: &str) -> TypeRegistration {
        TypeRegistration {
            key: ObjectTypeKey::new(key),
            graphql_name: None,
        }
    }

    pub fn with_graphql_name(key: &str, graphql_name: &str) -> TypeRegistration {
        TypeRegistration {
            key: ObjectTypeKey::new(key),
            graphql_name: Some(ObjectTypeKey::new(graphql_name)),
        }
    }

    /// The discriminant under which this type is exposed: the alternate
    /// name when one is registered, the raw key otherwise.
    pub fn schema_key(&self) -> &ObjectTypeKey {
        self.graphql_name.as_ref().unwrap_or(&self.key)
    }
}

/// Lookup of the metadata keys registered for an object type.
///
/// The returned map preserves the registry's native order; that order is
/// not guaranteed stable across calls and the augmenter does not depend
/// on it beyond iterating it as given.
pub trait MetaKeyRegistry {
    fn registered_meta_keys(&self, object_type: &ObjectTypeKey)
        -> IndexMap<MetaKey, MetaDescriptor>;
}

/// The host's enumeration of object types. Membership checks are answered
/// from the current state of the enumeration on every call; long-lived
/// hosts register and unregister kinds between schema build and query
/// execution, and resolvers dispatch against whatever is current.
pub trait ObjectTypeIndex {
    fn content_kinds(&self) -> Vec<TypeRegistration>;

    fn taxonomy_kinds(&self) -> Vec<TypeRegistration>;

    fn is_content_kind(&self, key: &ObjectTypeKey) -> bool {
        self.content_kinds().iter().any(|r| r.key == *key)
    }

    fn is_taxonomy_kind(&self, key: &ObjectTypeKey) -> bool {
        self.taxonomy_kinds().iter().any(|r| r.key == *key)
    }
}

/// Identifier of a single queryable instance within its object-type family.
pub type InstanceId = u64;

/// The source object handed to a resolver by the query executor. Content
/// items and users carry their own identifier; taxonomy terms carry a term
/// identifier.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instance {
    ContentItem { id: InstanceId },
    Term { term_id: InstanceId },
    User { id: InstanceId },
}

impl Instance {
    pub fn id(&self) -> InstanceId {
        match self {
            Instance::ContentItem { id } | Instance::User { id } => *id,
            Instance::Term { term_id } => *term_id,
        }
    }
}

/// Stored metadata access, one accessor per object-type family. Not-found
/// semantics are the accessor's own; the resolver passes its result through
/// unchanged.
pub trait MetaValueSource {
    fn content_meta(&self, id: InstanceId, key: &MetaKey, single: bool) -> Value;

    fn term_meta(&self, id: InstanceId, key: &MetaKey, single: bool) -> Value;

    fn user_meta(&self, id: InstanceId, key: &MetaKey, single: bool) -> Value;
}

#[cfg(test)]
mod tests {
    use super::{ObjectTypeKey, TypeRegistration};

    #[test]
    fn test_schema_key_prefers_alternate_name() {
        let plain = TypeRegistration::new("post");
        assert_eq!(plain.schema_key(), &ObjectTypeKey::new("post"));

        let aliased = TypeRegistration::with_graphql_name("wp_block", "reusableBlock");
        assert_eq!(aliased.schema_key(), &ObjectTypeKey::new("reusableBlock"));
        assert_eq!(aliased.key, ObjectTypeKey::new("wp_block"));
    }

    #[test]
    fn test_user_key() {
        assert!(ObjectTypeKey::user().is_user());
        assert!(!ObjectTypeKey::new("post").is_user());
    }
}
