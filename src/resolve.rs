//! Query-time resolution of metadata fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metadata::{Instance, MetaKey, MetaValueSource, ObjectTypeIndex, ObjectTypeKey};

/// The resolver attached to a field minted from a metadata descriptor.
/// Carries exactly what was captured at schema-build time: the object type
/// the field was minted for, the registry key, and the single/collection
/// flag forwarded to the accessor.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct MetaFieldResolver {
    pub object_type: ObjectTypeKey,
    pub key: MetaKey,
    pub single: bool,
}

impl MetaFieldResolver {
    /// Read the stored metadata value for one instance.
    ///
    /// Which accessor to call is re-derived against the current
    /// [`ObjectTypeIndex`] on every invocation rather than being fixed at
    /// schema-build time: the host can register or unregister kinds while
    /// the built schema is still serving queries, and dispatch must follow
    /// the registry as it is now. An object type no longer known to any
    /// family resolves to an empty string instead of failing the query.
    pub fn resolve(
        &self,
        instance: &Instance,
        types: &dyn ObjectTypeIndex,
        source: &dyn MetaValueSource,
    ) -> Value {
        if types.is_content_kind(&self.object_type) {
            return source.content_meta(instance.id(), &self.key, self.single);
        }
        if types.is_taxonomy_kind(&self.object_type) {
            return source.term_meta(instance.id(), &self.key, self.single);
        }
        if self.object_type.is_user() {
            return source.user_meta(instance.id(), &self.key, self.single);
        }
        tracing::debug!(
            object_type = %self.object_type,
            key = %self.key,
            "object type not known to any family, resolving to empty string"
        );
        Value::String(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::MetaFieldResolver;
    use crate::metadata::{
        Instance, InstanceId, MetaKey, MetaValueSource, ObjectTypeIndex, ObjectTypeKey,
        TypeRegistration,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    struct StaticKinds {
        content: Vec<&'static str>,
        taxonomies: Vec<&'static str>,
    }

    impl ObjectTypeIndex for StaticKinds {
        fn content_kinds(&self) -> Vec<TypeRegistration> {
            self.content.iter().map(|k| TypeRegistration::new(k)).collect()
        }

        fn taxonomy_kinds(&self) -> Vec<TypeRegistration> {
            self.taxonomies
                .iter()
                .map(|k| TypeRegistration::new(k))
                .collect()
        }
    }

    // Tags each accessor's result so the test can see which family was hit.
    struct TracingSource;

    impl MetaValueSource for TracingSource {
        fn content_meta(&self, id: InstanceId, key: &MetaKey, single: bool) -> Value {
            json!(["content", id, key.as_str(), single])
        }

        fn term_meta(&self, id: InstanceId, key: &MetaKey, single: bool) -> Value {
            json!(["term", id, key.as_str(), single])
        }

        fn user_meta(&self, id: InstanceId, key: &MetaKey, single: bool) -> Value {
            json!(["user", id, key.as_str(), single])
        }
    }

    fn resolver(object_type: &str) -> MetaFieldResolver {
        MetaFieldResolver {
            object_type: ObjectTypeKey::new(object_type),
            key: MetaKey::new("rating"),
            single: true,
        }
    }

    #[test]
    fn test_dispatch_per_family() {
        let kinds = StaticKinds {
            content: vec!["post", "page"],
            taxonomies: vec!["category"],
        };

        assert_eq!(
            resolver("post").resolve(&Instance::ContentItem { id: 42 }, &kinds, &TracingSource),
            json!(["content", 42, "rating", true])
        );
        assert_eq!(
            resolver("category").resolve(&Instance::Term { term_id: 7 }, &kinds, &TracingSource),
            json!(["term", 7, "rating", true])
        );
        assert_eq!(
            resolver("user").resolve(&Instance::User { id: 3 }, &kinds, &TracingSource),
            json!(["user", 3, "rating", true])
        );
    }

    #[test]
    fn test_unknown_object_type_resolves_to_empty_string() {
        let kinds = StaticKinds {
            content: vec!["post"],
            taxonomies: vec![],
        };
        assert_eq!(
            resolver("widget").resolve(&Instance::ContentItem { id: 1 }, &kinds, &TracingSource),
            json!("")
        );
    }

    #[test]
    fn test_dispatch_follows_current_registry() {
        let resolver = resolver("release");

        // At build time "release" was a content kind...
        let before = StaticKinds {
            content: vec!["release"],
            taxonomies: vec![],
        };
        assert_eq!(
            resolver.resolve(&Instance::ContentItem { id: 9 }, &before, &TracingSource),
            json!(["content", 9, "rating", true])
        );

        // ...but the host re-registered it as a taxonomy afterwards.
        let after = StaticKinds {
            content: vec![],
            taxonomies: vec!["release"],
        };
        assert_eq!(
            resolver.resolve(&Instance::Term { term_id: 9 }, &after, &TracingSource),
            json!(["term", 9, "rating", true])
        );
    }
}
