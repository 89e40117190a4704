use crate::{
    adapter::AssemblerAdapter,
    engine::{ErrorConverter, IdExtractor, Rules},
    rules::{AnyValue, IntoRules},
    Assembler,
};
use assembler_core::{DynMapper, Error, MapperError};

use std::{hash::Hash, marker::PhantomData, sync::Arc};

/// Starts configuring an assembler producing `R`.
///
/// ```ignore
/// let assembler = assembler_of::<Transaction>()
///     .with_id_extractor(|customer: &Customer| customer.id)
///     .with_assembler_rules((billing_info, orders), Transaction::new)
///     .using(Concurrent);
/// ```
pub fn assembler_of<R>() -> WithIdExtractor<R> {
    WithIdExtractor { _p: PhantomData }
}

/// First stage: waiting for the identifier extractor.
#[derive(Debug)]
pub struct WithIdExtractor<R> {
    _p: PhantomData<fn() -> R>,
}

/// Second stage: waiting for the mappers and the domain object builder.
pub struct WithRules<T, ID, R> {
    id_extractor: IdExtractor<T, ID>,
    _p: PhantomData<fn() -> R>,
}

/// Last stage: waiting for the adapter, optionally overriding the error
/// converter first.
pub struct AssembleUsing<T, ID, V, R> {
    rules: Rules<T, ID, V, R>,
}

impl<R> WithIdExtractor<R> {
    /// Sets how the identifier of a top-level entity is read.
    ///
    /// The identifier is matched against the keys of every mapper result.
    pub fn with_id_extractor<T, ID, F>(self, id_extractor: F) -> WithRules<T, ID, R>
    where
        F: Fn(&T) -> ID + Send + Sync + 'static,
    {
        WithRules {
            id_extractor: Arc::new(id_extractor),
            _p: PhantomData,
        }
    }
}

impl<T, ID, R> WithRules<T, ID, R> {
    /// Sets the mappers and the function combining their results.
    ///
    /// `domain_object_builder` receives each entity with a vec holding, at
    /// index `i`, the value mapper `i` found for that entity, or `None`.
    pub fn with_rules<V, F>(
        self,
        mappers: impl IntoIterator<Item = DynMapper<ID, V>>,
        domain_object_builder: F,
    ) -> AssembleUsing<T, ID, V, R>
    where
        F: Fn(T, Vec<Option<V>>) -> R + Send + Sync + 'static,
    {
        AssembleUsing {
            rules: Rules {
                id_extractor: self.id_extractor,
                mappers: mappers.into_iter().collect(),
                domain_object_builder: Arc::new(domain_object_builder),
                error_converter: Arc::new(Error::mapper_invocation),
            },
        }
    }

    /// Sets a tuple of typed mappers and a builder taking one argument per
    /// mapper.
    ///
    /// The builder is called with the entity followed by what each mapper
    /// found for it, in tuple order.
    pub fn with_assembler_rules<M, F>(self, rules: M, domain_object_builder: F) -> AssembleUsing<T, ID, AnyValue, R>
    where
        M: IntoRules<T, ID, R, F>,
    {
        let (mappers, domain_object_builder) = rules.into_rules(domain_object_builder);

        AssembleUsing {
            rules: Rules {
                id_extractor: self.id_extractor,
                mappers,
                domain_object_builder,
                error_converter: Arc::new(Error::mapper_invocation),
            },
        }
    }
}

impl<T, ID, V, R> AssembleUsing<T, ID, V, R> {
    /// Replaces how mapper failures are translated.
    ///
    /// By default a failure is wrapped with [`Error::mapper_invocation`].
    pub fn with_error_converter<F>(mut self, error_converter: F) -> Self
    where
        F: Fn(MapperError) -> Error + Send + Sync + 'static,
    {
        self.rules.error_converter = Arc::new(error_converter) as ErrorConverter;
        self
    }

    /// Picks the adapter and finishes the assembler.
    pub fn using<A>(self, adapter: A) -> Assembler<T, ID, V, R, A>
    where
        ID: Eq + Hash,
        A: AssemblerAdapter<ID, V, R>,
    {
        Assembler::new(self.rules, adapter)
    }
}
