use super::DomainObjectBuilder;
use assembler_core::MapperResult;

use std::{collections::HashSet, hash::Hash, sync::Arc, vec};

/// Positional join of mapper results onto top-level entities.
///
/// The join runs once every mapper source has been realized:
/// * Results arrive as one map per mapper, in mapper declaration order.
/// * For each entity, in input order:
///     * Look the entity's identifier up in every result map.
///     * Collect the hits (or `None`) into a vec indexed by mapper position.
///     * Hand the entity and that vec to the domain object builder.
///
/// Entities sharing an identifier each receive a clone of the value. The last
/// entity with a given identifier takes the value out of the map instead.
pub(crate) struct Join<T, ID, V, R> {
    entities: Vec<T>,
    ids: Arc<[ID]>,
    builder: DomainObjectBuilder<T, V, R>,
}

/// Lazily assembled objects, one per entity, in entity order.
pub struct Joined<T, ID, V, R> {
    entities: vec::IntoIter<T>,
    ids: Arc<[ID]>,
    /// `last[i]` is set when no entity after `i` shares its identifier
    last: Vec<bool>,
    position: usize,
    results: Vec<MapperResult<ID, V>>,
    builder: DomainObjectBuilder<T, V, R>,
}

impl<T, ID, V, R> Join<T, ID, V, R>
where
    ID: Eq + Hash,
    V: Clone,
{
    pub(crate) fn new(
        entities: Vec<T>,
        ids: Arc<[ID]>,
        builder: DomainObjectBuilder<T, V, R>,
    ) -> Self {
        debug_assert_eq!(entities.len(), ids.len());
        Join {
            entities,
            ids,
            builder,
        }
    }

    pub(crate) fn join(self, results: Vec<MapperResult<ID, V>>) -> Joined<T, ID, V, R> {
        let mut last: Vec<bool> = {
            let mut seen = HashSet::with_capacity(self.ids.len());
            self.ids.iter().rev().map(|id| seen.insert(id)).collect()
        };
        last.reverse();

        Joined {
            entities: self.entities.into_iter(),
            ids: self.ids,
            last,
            position: 0,
            results,
            builder: self.builder,
        }
    }
}

impl<T, ID, V, R> Iterator for Joined<T, ID, V, R>
where
    ID: Eq + Hash,
    V: Clone,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let entity = self.entities.next()?;
        let id = &self.ids[self.position];
        let last = self.last[self.position];
        self.position += 1;

        let values = self
            .results
            .iter_mut()
            .map(|result| {
                if last {
                    result.remove(id)
                } else {
                    result.get(id).cloned()
                }
            })
            .collect();

        Some((self.builder)(entity, values))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entities.size_hint()
    }
}

impl<T, ID, V, R> ExactSizeIterator for Joined<T, ID, V, R>
where
    ID: Eq + Hash,
    V: Clone,
{
}
