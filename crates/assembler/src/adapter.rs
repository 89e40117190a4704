mod blocking;
pub use blocking::Blocking;

mod concurrent;
pub use concurrent::Concurrent;

mod parallel;
pub use parallel::Parallel;

mod streaming;
pub use streaming::Streaming;

use crate::engine::MapperSources;
use assembler_core::MapperResult;

/// Decides how mapper sources are realized and what the caller gets back.
///
/// An adapter receives the sources of one assembly, in mapper declaration
/// order, and the join that turns realized results into assembled objects.
/// It must:
/// * realize every source exactly once,
/// * pass the realized results to `join` in the order the sources came in,
/// * surface source failures through the same container as the results.
///
/// Sources are independent of each other and may be realized in any order or
/// concurrently.
pub trait AssemblerAdapter<ID, V, R> {
    /// The container handed back to the caller of `assemble`.
    type Output;

    fn convert_mapper_sources<J, I>(&self, sources: MapperSources<ID, V>, join: J) -> Self::Output
    where
        J: FnOnce(Vec<MapperResult<ID, V>>) -> I + Send + 'static,
        I: Iterator<Item = R> + Send + 'static;
}
