use super::AssemblerAdapter;
use crate::engine::MapperSources;
use assembler_core::{Error, MapperResult, Result};

use futures::future::BoxFuture;
use tokio::{runtime::Handle, task::JoinSet};

/// Spawns every mapper source as its own Tokio task.
///
/// Tasks are spawned when the returned future is first polled, on the
/// runtime given to [`Parallel::on`] or else on the runtime polling the
/// future. Results are put back in mapper declaration order regardless of
/// completion order. When one source fails, the tasks still running are
/// aborted.
#[derive(Debug, Default, Clone)]
pub struct Parallel {
    handle: Option<Handle>,
}

impl Parallel {
    /// Spawns on the runtime that polls the assembly.
    pub fn new() -> Parallel {
        Parallel::default()
    }

    /// Spawns on the runtime behind `handle`.
    pub fn on(handle: Handle) -> Parallel {
        Parallel {
            handle: Some(handle),
        }
    }
}

impl<ID, V, R> AssemblerAdapter<ID, V, R> for Parallel
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
        let handle = self.handle.clone();

        Box::pin(async move {
            let mut tasks = JoinSet::new();
            let mut results: Vec<Option<MapperResult<ID, V>>> = Vec::with_capacity(sources.len());

            for (index, source) in sources.enumerate() {
                let task = async move { (index, source.await) };
                match &handle {
                    Some(handle) => tasks.spawn_on(task, handle),
                    None => tasks.spawn(task),
                };
                results.push(None);
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, result)) => results[index] = Some(result?),
                    Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                    Err(_) => return Err(Error::task_cancelled()),
                }
            }

            let results = results
                .into_iter()
                .map(|result| result.ok_or_else(Error::task_cancelled))
                .collect::<Result<Vec<_>>>()?;

            Ok(join(results).collect())
        })
    }
}
