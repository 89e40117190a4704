mod join;
pub(crate) use join::Join;
pub use join::Joined;

mod sources;
pub use sources::{MapperSource, MapperSources};

use crate::adapter::AssemblerAdapter;
use assembler_core::{DynMapper, Error, MapperError};

use std::{hash::Hash, sync::Arc};

/// Extracts the identifier of a top-level entity.
pub type IdExtractor<T, ID> = Arc<dyn Fn(&T) -> ID + Send + Sync>;

/// Builds one assembled object from an entity and the values every mapper
/// found for it, indexed by mapper declaration position.
pub type DomainObjectBuilder<T, V, R> = Arc<dyn Fn(T, Vec<Option<V>>) -> R + Send + Sync>;

/// Translates a mapper failure into the assembler's [`Error`].
pub type ErrorConverter = Arc<dyn Fn(MapperError) -> Error + Send + Sync>;

/// Everything an assembly needs besides the entities and the adapter.
pub(crate) struct Rules<T, ID, V, R> {
    pub(crate) id_extractor: IdExtractor<T, ID>,
    pub(crate) mappers: Arc<[DynMapper<ID, V>]>,
    pub(crate) domain_object_builder: DomainObjectBuilder<T, V, R>,
    pub(crate) error_converter: ErrorConverter,
}

/// Runs one assembly.
///
/// Identifiers are extracted up front, in entity order. The mapper sources
/// are created lazily and handed to the adapter together with the join,
/// which the adapter calls once it has realized every source.
pub(crate) fn assemble<T, ID, V, R, A>(
    entities: Vec<T>,
    rules: &Rules<T, ID, V, R>,
    adapter: &A,
) -> A::Output
where
    T: Send + 'static,
    ID: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + 'static,
    R: 'static,
    A: AssemblerAdapter<ID, V, R>,
{
    let ids: Arc<[ID]> = entities.iter().map(|entity| (rules.id_extractor)(entity)).collect();

    tracing::debug!(
        entities = entities.len(),
        mappers = rules.mappers.len(),
        "assembling entities"
    );

    let sources = MapperSources::new(
        rules.mappers.clone(),
        ids.clone(),
        rules.error_converter.clone(),
    );
    let join = Join::new(entities, ids, rules.domain_object_builder.clone());

    adapter.convert_mapper_sources(sources, move |results| join.join(results))
}

impl<T, ID, V, R> Clone for Rules<T, ID, V, R> {
    fn clone(&self) -> Self {
        Rules {
            id_extractor: self.id_extractor.clone(),
            mappers: self.mappers.clone(),
            domain_object_builder: self.domain_object_builder.clone(),
            error_converter: self.error_converter.clone(),
        }
    }
}
