//! Typed rule sets.
//!
//! A tuple of mappers with different value types is packed into the single
//! positional form the engine works with: every mapper's values are erased to
//! [`AnyValue`], and the builder of matching arity gets them back, downcast,
//! in tuple order.

use crate::engine::DomainObjectBuilder;
use assembler_core::{async_trait, DynMapper, Mapper, MapperError, MapperResult};

use std::{any::Any, hash::Hash, sync::Arc};

/// A mapper value with its type erased.
pub type AnyValue = Arc<dyn Any + Send + Sync>;

/// A tuple of mappers that can be paired with a builder `F`.
///
/// Implemented for tuples of 1 to 11 mappers, where `F` takes the entity
/// followed by one `Option<M::Value>` per mapper.
pub trait IntoRules<T, ID, R, F> {
    fn into_rules(
        self,
        domain_object_builder: F,
    ) -> (Arc<[DynMapper<ID, AnyValue>]>, DomainObjectBuilder<T, AnyValue, R>);
}

/// Erases the value type of a mapper.
struct Erased<M>(M);

#[async_trait]
impl<ID, M> Mapper<ID> for Erased<M>
where
    ID: Eq + Hash + Send + Sync + 'static,
    M: Mapper<ID>,
    M::Value: Sync,
{
    type Value = AnyValue;

    async fn map(&self, ids: &[ID]) -> Result<MapperResult<ID, AnyValue>, MapperError> {
        let result = self.0.map(ids).await?;

        Ok(result
            .into_iter()
            .map(|(id, value)| (id, Arc::new(value) as AnyValue))
            .collect())
    }
}

fn downcast<E>(value: Option<AnyValue>) -> Option<E>
where
    E: Clone + Send + Sync + 'static,
{
    let value = value?.downcast::<E>().ok()?;
    Some(Arc::unwrap_or_clone(value))
}

macro_rules! impl_into_rules {
    ( $( $m:ident $mapper:ident ),+ ) => {
        impl<T, ID, R, F, $( $m ),+> IntoRules<T, ID, R, F> for ( $( $m, )+ )
        where
            T: 'static,
            ID: Eq + Hash + Send + Sync + 'static,
            R: 'static,
            $(
                $m: Mapper<ID>,
                $m::Value: Clone + Sync,
            )+
            F: Fn(T, $( Option<$m::Value> ),+) -> R + Send + Sync + 'static,
        {
            fn into_rules(
                self,
                domain_object_builder: F,
            ) -> (Arc<[DynMapper<ID, AnyValue>]>, DomainObjectBuilder<T, AnyValue, R>) {
                let ( $( $mapper, )+ ) = self;

                let mappers: Arc<[DynMapper<ID, AnyValue>]> = Arc::new([
                    $( Arc::new(Erased($mapper)) as DynMapper<ID, AnyValue> ),+
                ]);

                let domain_object_builder = move |entity: T, values: Vec<Option<AnyValue>>| {
                    let mut values = values.into_iter();
                    domain_object_builder(
                        entity,
                        $( downcast::<$m::Value>(values.next().flatten()) ),+
                    )
                };

                (mappers, Arc::new(domain_object_builder))
            }
        }
    };
}

impl_into_rules!(M1 m1);
impl_into_rules!(M1 m1, M2 m2);
impl_into_rules!(M1 m1, M2 m2, M3 m3);
impl_into_rules!(M1 m1, M2 m2, M3 m3, M4 m4);
impl_into_rules!(M1 m1, M2 m2, M3 m3, M4 m4, M5 m5);
impl_into_rules!(M1 m1, M2 m2, M3 m3, M4 m4, M5 m5, M6 m6);
impl_into_rules!(M1 m1, M2 m2, M3 m3, M4 m4, M5 m5, M6 m6, M7 m7);
impl_into_rules!(M1 m1, M2 m2, M3 m3, M4 m4, M5 m5, M6 m6, M7 m7, M8 m8);
impl_into_rules!(M1 m1, M2 m2, M3 m3, M4 m4, M5 m5, M6 m6, M7 m7, M8 m8, M9 m9);
impl_into_rules!(M1 m1, M2 m2, M3 m3, M4 m4, M5 m5, M6 m6, M7 m7, M8 m8, M9 m9, M10 m10);
impl_into_rules!(M1 m1, M2 m2, M3 m3, M4 m4, M5 m5, M6 m6, M7 m7, M8 m8, M9 m9, M10 m10, M11 m11);
