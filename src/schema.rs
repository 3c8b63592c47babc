//! The slice of the schema builder's field model this crate produces and
//! consumes: a per-object-type map of field definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ast;
use crate::resolve::MetaFieldResolver;

/// The fields exposed for one object type, keyed by field name. Built
/// incrementally; keys are unique and insertion order is irrelevant.
pub type FieldSet = BTreeMap<ast::Name, Field>;

/// A single field definition as handed back to the schema builder.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Field {
    pub name: ast::Name,
    pub description: Option<String>,
    pub field_type: ast::Type,
    /// `Some` for fields minted from metadata descriptors; `None` for the
    /// base fields the schema builder defined itself.
    pub resolver: Option<MetaFieldResolver>,
}

impl Field {
    /// A base field owned by the surrounding schema builder.
    pub fn new(name: ast::Name, description: Option<String>, field_type: ast::Type) -> Self {
        Field {
            name,
            description,
            field_type,
            resolver: None,
        }
    }

    pub fn with_resolver(
        name: ast::Name,
        description: Option<String>,
        field_type: ast::Type,
        resolver: MetaFieldResolver,
    ) -> Self {
        Field {
            name,
            description,
            field_type,
            resolver: Some(resolver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, FieldSet};
    use crate::ast;

    #[test]
    fn test_field_set_keys_are_unique() {
        let mut fields = FieldSet::new();
        fields.insert(
            crate::mk_name!("id"),
            Field::new(crate::mk_name!("id"), None, ast::Type::int()),
        );
        let replaced = fields.insert(
            crate::mk_name!("id"),
            Field::new(crate::mk_name!("id"), None, ast::Type::string()),
        );
        assert!(replaced.is_some());
        assert_eq!(fields.len(), 1);
    }
}
