//! Bridges a content-management system's metadata registry into a GraphQL
//! schema.
//!
//! For every registered object type (content-item kinds, taxonomy kinds and
//! the fixed `user` kind), the [`FieldAugmenter`] inspects the metadata keys
//! declared for that type and mints one field per key exposed to public
//! APIs, attaching a [`MetaFieldResolver`] that reads the stored value at
//! query time. The surrounding GraphQL server, the schema type system
//! proper and the metadata storage engine are external collaborators,
//! expressed as the traits in [`metadata`].

pub mod ast;
mod augment;
pub mod metadata;
mod resolve;
mod schema;

pub use augment::{extend_schema_types, resolve_meta_type, FieldAugmenter, TypeOverrides};
pub use metadata::{
    Instance, InstanceId, MetaDescriptor, MetaKey, MetaKeyRegistry, MetaValueKind,
    MetaValueSource, ObjectTypeIndex, ObjectTypeKey, TypeRegistration,
};
pub use resolve::MetaFieldResolver;
pub use schema::{Field, FieldSet};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("metadata key {key} is a reserved field name on object type {object_type}")]
    ReservedMetaKey {
        key: MetaKey,
        object_type: ObjectTypeKey,
    },
    #[error("metadata key {key} on object type {object_type} is not a valid graphql field name")]
    InvalidFieldName {
        key: MetaKey,
        object_type: ObjectTypeKey,
    },
}
