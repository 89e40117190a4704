use super::AssemblerAdapter;
use crate::engine::MapperSources;
use assembler_core::{MapperResult, Result};

/// Realizes mapper sources one after the other on the calling thread.
///
/// Each source is driven to completion with [`futures::executor::block_on`]
/// before the next one is started, so `assemble` returns the finished list.
/// Mappers that need a Tokio reactor (sockets, timers) must not be used with
/// this adapter, and it must not be called from inside an async task.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blocking;

impl<ID, V, R> AssemblerAdapter<ID, V, R> for Blocking
where
    ID: Send + Sync + 'static,
    V: Send + 'static,
{
    type Output = Result<Vec<R>>;

    fn convert_mapper_sources<J, I>(&self, sources: MapperSources<ID, V>, join: J) -> Self::Output
    where
        J: FnOnce(Vec<MapperResult<ID, V>>) -> I + Send + 'static,
        I: Iterator<Item = R> + Send + 'static,
    {
        let mut results = Vec::with_capacity(sources.len());

        for source in sources {
            results.push(futures::executor::block_on(source)?);
        }

        Ok(join(results).collect())
    }
}
