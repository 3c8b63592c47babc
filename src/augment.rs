//! Extends an object type's field set with fields minted from its
//! registered metadata descriptors.

use std::collections::BTreeMap;

use smol_str::SmolStr;

use crate::ast;
use crate::metadata::{
    MetaDescriptor, MetaKey, MetaKeyRegistry, MetaValueKind, ObjectTypeIndex, ObjectTypeKey,
    TypeRegistration, USER_OBJECT_TYPE,
};
use crate::resolve::MetaFieldResolver;
use crate::schema::{Field, FieldSet};
use crate::Error;

/// Overrides for raw value-kind names outside the built-in scalar set.
///
/// Consulted only when the default scalar map has no entry; a registered
/// override wins over the `String` fallback. This is the single extension
/// point for custom metadata types.
#[derive(Debug, Clone, Default)]
pub struct TypeOverrides {
    map: BTreeMap<SmolStr, ast::Type>,
}

impl TypeOverrides {
    pub fn new() -> TypeOverrides {
        TypeOverrides::default()
    }

    pub fn register(&mut self, raw_kind: &str, schema_type: ast::Type) {
        self.map.insert(SmolStr::new(raw_kind), schema_type);
    }

    pub fn get(&self, raw_kind: &str) -> Option<&ast::Type> {
        self.map.get(raw_kind)
    }
}

/// Maps a descriptor's declared value kind to a schema type reference.
///
/// Pre-resolved types pass through untouched. Scalar-kind names map by
/// exact match, with [`TypeOverrides`] as the escape hatch before the
/// `String` fallback. A collection-valued key (`single == false`) gets the
/// resolved scalar wrapped in a list.
pub fn resolve_meta_type(
    kind: &MetaValueKind,
    single: bool,
    overrides: &TypeOverrides,
) -> ast::Type {
    let scalar = match kind {
        // A pre-resolved type is used exactly as supplied, without the
        // singular/plural wrapping below.
        MetaValueKind::Resolved(schema_type) => return schema_type.clone(),
        MetaValueKind::Integer => ast::Type::int(),
        MetaValueKind::Number => ast::Type::float(),
        MetaValueKind::Boolean => ast::Type::boolean(),
        MetaValueKind::String => ast::Type::string(),
        MetaValueKind::Other(raw_kind) => overrides
            .get(raw_kind)
            .cloned()
            .unwrap_or_else(ast::Type::string),
    };

    if single {
        scalar
    } else {
        ast::Type::list_of(scalar)
    }
}

/// The field augmenter. Holds its collaborators as read-only references;
/// all state lives in the host's registries and in the field set being
/// built.
pub struct FieldAugmenter<'s> {
    registry: &'s dyn MetaKeyRegistry,
    overrides: &'s TypeOverrides,
}

impl<'s> FieldAugmenter<'s> {
    pub fn new(registry: &'s dyn MetaKeyRegistry, overrides: &'s TypeOverrides) -> Self {
        FieldAugmenter {
            registry,
            overrides,
        }
    }

    /// Extend `fields` with one field per metadata descriptor registered
    /// for `object_type` and exposed over public APIs.
    ///
    /// A descriptor whose key is already present in `fields` aborts the
    /// whole augmentation with [`Error::ReservedMetaKey`]: silently
    /// dropping the field or clobbering a built-in one would break API
    /// compatibility undetectably, so the operator gets a hard error and
    /// renames the key instead. The error is raised even for keys hidden
    /// from the public API, since the collision is a configuration bug
    /// either way.
    pub fn augment(
        &self,
        mut fields: FieldSet,
        object_type: &ObjectTypeKey,
    ) -> Result<FieldSet, Error> {
        let meta_keys = self.registry.registered_meta_keys(object_type);
        if meta_keys.is_empty() {
            return Ok(fields);
        }

        for (key, descriptor) in meta_keys {
            if fields.keys().any(|name| name.as_str() == key.as_str()) {
                return Err(Error::ReservedMetaKey {
                    key,
                    object_type: object_type.clone(),
                });
            }

            if !descriptor.show_in_rest {
                tracing::trace!(
                    object_type = %object_type,
                    key = %key,
                    "metadata key not exposed over public APIs, skipping"
                );
                continue;
            }

            let field = self.mint_field(key, descriptor, object_type)?;
            fields.insert(field.name.clone(), field);
        }

        Ok(fields)
    }

    fn mint_field(
        &self,
        key: MetaKey,
        descriptor: MetaDescriptor,
        object_type: &ObjectTypeKey,
    ) -> Result<Field, Error> {
        let name = ast::Name::new(key.as_str()).map_err(|_| Error::InvalidFieldName {
            key: key.clone(),
            object_type: object_type.clone(),
        })?;
        let field_type = resolve_meta_type(&descriptor.value_kind, descriptor.single, self.overrides);
        tracing::debug!(
            object_type = %object_type,
            key = %key,
            field_type = %field_type,
            "adding metadata field"
        );
        Ok(Field::with_resolver(
            name,
            descriptor.description,
            field_type,
            MetaFieldResolver {
                object_type: object_type.clone(),
                key,
                single: descriptor.single,
            },
        ))
    }
}

/// Runs the augmenter once per registered object type, the way the host's
/// schema-build hook would: every content-item kind, every taxonomy kind,
/// and the fixed user kind, each published under its externally facing
/// name. The extended field set replaces the base one; a type with no base
/// entry starts from an empty set. The first error aborts the build.
pub fn extend_schema_types(
    augmenter: &FieldAugmenter<'_>,
    types: &dyn ObjectTypeIndex,
    mut base_fields: BTreeMap<ObjectTypeKey, FieldSet>,
) -> Result<BTreeMap<ObjectTypeKey, FieldSet>, Error> {
    let mut registrations = types.content_kinds();
    registrations.extend(types.taxonomy_kinds());
    registrations.push(TypeRegistration::new(USER_OBJECT_TYPE));

    for registration in registrations {
        let schema_key = registration.schema_key().clone();
        let fields = base_fields.remove(&schema_key).unwrap_or_default();
        let extended = augmenter.augment(fields, &registration.key)?;
        base_fields.insert(schema_key, extended);
    }

    Ok(base_fields)
}

#[cfg(test)]
mod tests {
    use super::{resolve_meta_type, TypeOverrides};
    use crate::ast;
    use crate::metadata::MetaValueKind;
    use pretty_assertions::assert_eq;
    use smol_str::SmolStr;

    #[test]
    fn test_builtin_scalar_mapping() {
        let overrides = TypeOverrides::new();
        assert_eq!(
            resolve_meta_type(&MetaValueKind::Integer, true, &overrides),
            ast::Type::int()
        );
        assert_eq!(
            resolve_meta_type(&MetaValueKind::Number, true, &overrides),
            ast::Type::float()
        );
        assert_eq!(
            resolve_meta_type(&MetaValueKind::Boolean, true, &overrides),
            ast::Type::boolean()
        );
        assert_eq!(
            resolve_meta_type(&MetaValueKind::String, true, &overrides),
            ast::Type::string()
        );
    }

    #[test]
    fn test_collection_wraps_in_list() {
        let overrides = TypeOverrides::new();
        assert_eq!(
            resolve_meta_type(&MetaValueKind::Integer, false, &overrides),
            ast::Type::list_of(ast::Type::int())
        );
    }

    #[test]
    fn test_unknown_kind_falls_back_to_string() {
        let overrides = TypeOverrides::new();
        assert_eq!(
            resolve_meta_type(&MetaValueKind::Other(SmolStr::new("unknown_kind")), true, &overrides),
            ast::Type::string()
        );
    }

    #[test]
    fn test_override_wins_over_string_fallback() {
        let mut overrides = TypeOverrides::new();
        let custom = ast::Type::named(ast::TypeName(crate::mk_name!("Json")));
        overrides.register("unknown_kind", custom.clone());
        assert_eq!(
            resolve_meta_type(&MetaValueKind::Other(SmolStr::new("unknown_kind")), true, &overrides),
            custom
        );
        // Overrides are keyed by the exact raw kind name.
        assert_eq!(
            resolve_meta_type(&MetaValueKind::Other(SmolStr::new("other_kind")), true, &overrides),
            ast::Type::string()
        );
    }

    #[test]
    fn test_pre_resolved_type_passes_through() {
        let overrides = TypeOverrides::new();
        let custom = ast::Type::named_non_null(ast::TypeName(crate::mk_name!("Block")));
        assert_eq!(
            resolve_meta_type(&MetaValueKind::Resolved(custom.clone()), true, &overrides),
            custom
        );
        // The singular/plural wrapping applies only to scalar-kind names;
        // a pre-resolved type is used exactly as supplied.
        assert_eq!(
            resolve_meta_type(&MetaValueKind::Resolved(custom.clone()), false, &overrides),
            custom
        );
    }
}
