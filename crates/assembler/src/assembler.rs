use crate::{
    adapter::AssemblerAdapter,
    engine::{self, Rules},
};
use assembler_core::{Error, MapperError, Result};

use std::{fmt, hash::Hash};

/// Joins mapper results onto top-level entities.
///
/// Built with [`assembler_of`](crate::assembler_of). An assembler holds no
/// per-call state: it can be cloned, shared between threads and called any
/// number of times.
pub struct Assembler<T, ID, V, R, A> {
    rules: Rules<T, ID, V, R>,
    adapter: A,
}

impl<T, ID, V, R, A> Assembler<T, ID, V, R, A> {
    pub(crate) fn new(rules: Rules<T, ID, V, R>, adapter: A) -> Self {
        Assembler { rules, adapter }
    }

    /// Number of mappers, which is also the length of the vec handed to the
    /// domain object builder.
    pub fn num_mappers(&self) -> usize {
        self.rules.mappers.len()
    }

    /// The adapter every call to [`assemble`](Self::assemble) goes through.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}

impl<T, ID, V, R, A> Assembler<T, ID, V, R, A>
where
    T: Send + 'static,
    ID: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + 'static,
    R: 'static,
    A: AssemblerAdapter<ID, V, R>,
{
    /// Assembles one object per entity, in entity order.
    ///
    /// Every mapper is invoked exactly once with the identifiers of all
    /// entities, even when there are none. What comes back, and when the
    /// mappers actually run, is up to the adapter.
    ///
    /// Entities are moved into the join, which any adapter may run on another
    /// task. They must be `Send + 'static` for every adapter, `Blocking`
    /// included, and mapper values must be `Clone` so that entities sharing an
    /// identifier each get one.
    ///
    /// ```compile_fail
    /// use assembler::{assembler_of, Blocking, DynMapper};
    /// use std::rc::Rc;
    ///
    /// let assembler = assembler_of::<u32>()
    ///     .with_id_extractor(|n: &Rc<u32>| **n)
    ///     .with_rules(Vec::<DynMapper<u32, u32>>::new(), |n, _| *n)
    ///     .using(Blocking);
    ///
    /// assembler.assemble(vec![Rc::new(1)]);
    /// ```
    pub fn assemble(&self, entities: impl IntoIterator<Item = T>) -> A::Output {
        engine::assemble(entities.into_iter().collect(), &self.rules, &self.adapter)
    }

    /// Loads the entities from `supplier`, then assembles them.
    ///
    /// The supplier runs on the calling thread. If it fails, no mapper is
    /// invoked and its failure is returned as [`Error::supplier_failed`].
    pub fn assemble_from_supplier<C, E, S>(&self, supplier: S) -> Result<A::Output>
    where
        S: FnOnce() -> core::result::Result<C, E>,
        C: IntoIterator<Item = T>,
        E: Into<MapperError>,
    {
        let entities = supplier().map_err(Error::supplier_failed)?;
        Ok(self.assemble(entities))
    }
}

impl<T, ID, V, R, A: Clone> Clone for Assembler<T, ID, V, R, A> {
    fn clone(&self) -> Self {
        Assembler {
            rules: self.rules.clone(),
            adapter: self.adapter.clone(),
        }
    }
}

impl<T, ID, V, R, A: fmt::Debug> fmt::Debug for Assembler<T, ID, V, R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assembler")
            .field("mappers", &self.rules.mappers.len())
            .field("adapter", &self.adapter)
            .finish()
    }
}
