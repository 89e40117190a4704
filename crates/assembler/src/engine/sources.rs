use super::ErrorConverter;
use assembler_core::{DynMapper, MapperResult, Result};

use futures::future::BoxFuture;
use std::{fmt, sync::Arc};

/// A deferred mapper invocation.
///
/// Nothing runs until the future is first polled. Mapper failures come out
/// already translated by the assembler's error converter.
pub type MapperSource<ID, V> = BoxFuture<'static, Result<MapperResult<ID, V>>>;

/// The mapper sources of one assembly, in mapper declaration order.
///
/// Each source is created when the iterator reaches it, so an adapter decides
/// both when a mapper invocation is built and when it is run.
pub struct MapperSources<ID, V> {
    mappers: Arc<[DynMapper<ID, V>]>,
    ids: Arc<[ID]>,
    error_converter: ErrorConverter,
    next: usize,
}

impl<ID, V> MapperSources<ID, V> {
    pub(crate) fn new(
        mappers: Arc<[DynMapper<ID, V>]>,
        ids: Arc<[ID]>,
        error_converter: ErrorConverter,
    ) -> Self {
        MapperSources {
            mappers,
            ids,
            error_converter,
            next: 0,
        }
    }

    /// The identifiers every mapper is invoked with.
    pub fn ids(&self) -> &[ID] {
        &self.ids
    }
}

impl<ID, V> Iterator for MapperSources<ID, V>
where
    ID: Send + Sync + 'static,
    V: Send + 'static,
{
    type Item = MapperSource<ID, V>;

    fn next(&mut self) -> Option<MapperSource<ID, V>> {
        let mapper = self.mappers.get(self.next)?.clone();
        let index = self.next;
        self.next += 1;

        let ids = self.ids.clone();
        let error_converter = self.error_converter.clone();

        Some(Box::pin(async move {
            tracing::trace!(mapper = index, ids = ids.len(), "invoking mapper");

            match mapper.map(&ids).await {
                Ok(result) => {
                    tracing::trace!(mapper = index, values = result.len(), "mapper done");
                    Ok(result)
                }
                Err(err) => {
                    tracing::debug!(mapper = index, error = %err, "mapper failed");
                    Err(error_converter(err))
                }
            }
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mappers.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl<ID, V> ExactSizeIterator for MapperSources<ID, V>
where
    ID: Send + Sync + 'static,
    V: Send + 'static,
{
}

impl<ID, V> fmt::Debug for MapperSources<ID, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperSources")
            .field("mappers", &self.mappers.len())
            .field("ids", &self.ids.len())
            .field("next", &self.next)
            .finish()
    }
}
