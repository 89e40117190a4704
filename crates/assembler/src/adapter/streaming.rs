use super::AssemblerAdapter;
use crate::{engine::MapperSources, Assembled};
use assembler_core::MapperResult;

use futures::future;

/// Hands assembled objects back one at a time as an [`Assembled`] stream.
///
/// Sources are realized concurrently when the stream is first polled. Once
/// they are all in, the join runs lazily: each poll builds the next object.
/// A failing source ends the stream with that error as its only item.
#[derive(Debug, Default, Clone, Copy)]
pub struct Streaming;

impl<ID, V, R> AssemblerAdapter<ID, V, R> for Streaming
where
    ID: Send + Sync + 'static,
    V: Send + 'static,
    R: Send + 'static,
{
    type Output = Assembled<R>;

    fn convert_mapper_sources<J, I>(&self, sources: MapperSources<ID, V>, join: J) -> Self::Output
    where
        J: FnOnce(Vec<MapperResult<ID, V>>) -> I + Send + 'static,
        I: Iterator<Item = R> + Send + 'static,
    {
        Assembled::from_stream(async_stream::try_stream! {
            let results = future::try_join_all(sources).await?;

            for item in join(results) {
                yield item;
            }
        })
    }
}
