use super::AssemblerAdapter;
use crate::engine::MapperSources;
use assembler_core::{MapperResult, Result};

use futures::future::{self, BoxFuture};

/// Realizes all mapper sources concurrently on the awaiting task.
///
/// No task is spawned: the returned future polls every source itself, so the
/// mappers interleave at their await points. The first failing source fails
/// the assembly and the remaining sources are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct Concurrent;

impl<ID, V, R> AssemblerAdapter<ID, V, R> for Concurrent
where
    ID: Send + Sync + 'static,
    V: Send + 'static,
    R: Send + 'static,
{
    type Output = BoxFuture<'static, Result<Vec<R>>>;

    fn convert_mapper_sources<J, I>(&self, sources: MapperSources<ID, V>, join: J) -> Self::Output
    where
        J: FnOnce(Vec<MapperResult<ID, V>>) -> I + Send + 'static,
        I: Iterator<Item = R> + Send + 'static,
    {
        Box::pin(async move {
            let results = future::try_join_all(sources).await?;
            Ok(join(results).collect())
        })
    }
}
