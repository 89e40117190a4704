use crate::async_trait;

use std::{collections::HashMap, sync::Arc};

/// The failure a mapper may raise.
///
/// Anything implementing [`std::error::Error`], as well as `anyhow::Error`,
/// converts into it with `?`.
pub type MapperError = Box<dyn std::error::Error + Send + Sync>;

/// Values looked up by a mapper, keyed by the identifier they belong to.
///
/// Keys missing from the map are read as "no value" for the matching
/// entity. Keys that no entity asked for are ignored.
pub type MapperResult<ID, V> = HashMap<ID, V>;

/// A type-erased, shareable mapper.
pub type DynMapper<ID, V> = Arc<dyn Mapper<ID, Value = V>>;

/// A batch lookup keyed by entity identifier.
///
/// An assembler calls `map` once per assembly with the identifiers of every
/// top-level entity, in entity order and with duplicates kept. The slice may
/// be empty.
#[async_trait]
pub trait Mapper<ID>: Send + Sync + 'static {
    /// The value looked up for one identifier. May itself be a collection.
    type Value: Send + 'static;

    /// Looks up the values for `ids`.
    async fn map(&self, ids: &[ID]) -> Result<MapperResult<ID, Self::Value>, MapperError>;
}

#[async_trait]
impl<ID, M> Mapper<ID> for Arc<M>
where
    ID: Sync,
    M: Mapper<ID> + ?Sized,
{
    type Value = M::Value;

    async fn map(&self, ids: &[ID]) -> Result<MapperResult<ID, Self::Value>, MapperError> {
        (**self).map(ids).await
    }
}

#[async_trait]
impl<ID, M> Mapper<ID> for Box<M>
where
    ID: Sync,
    M: Mapper<ID> + ?Sized,
{
    type Value = M::Value;

    async fn map(&self, ids: &[ID]) -> Result<MapperResult<ID, Self::Value>, MapperError> {
        (**self).map(ids).await
    }
}
