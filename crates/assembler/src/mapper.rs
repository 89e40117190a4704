//! Ready-made mappers built from closures and queries.

use assembler_core::{async_trait, Mapper, MapperError, MapperResult};

use std::{fmt, future::Future, hash::Hash};

/// Creates a mapper from a synchronous lookup.
pub fn from_fn<ID, V, E, F>(f: F) -> FromFn<F>
where
    F: Fn(&[ID]) -> Result<MapperResult<ID, V>, E>,
{
    FromFn { f }
}

/// Creates a mapper from an asynchronous lookup.
///
/// The closure receives its own copy of the identifiers so the returned
/// future does not borrow from the assembler.
pub fn from_async_fn<ID, V, E, F, Fut>(f: F) -> FromAsyncFn<F>
where
    F: Fn(Vec<ID>) -> Fut,
    Fut: Future<Output = Result<MapperResult<ID, V>, E>>,
{
    FromAsyncFn { f }
}

/// Creates a mapper from a query returning at most one row per identifier.
///
/// `query` returns a flat list of rows; each row is keyed by `id_of`.
/// Identifiers without a row are left out of the result, so the builder sees
/// `None` for them. If several rows share an identifier, the last one wins.
pub fn one_to_one<ID, V, E, Q, K, Fut>(query: Q, id_of: K) -> OneToOne<Q, K>
where
    Q: Fn(Vec<ID>) -> Fut,
    Fut: Future<Output = Result<Vec<V>, E>>,
    K: Fn(&V) -> ID,
{
    OneToOne { query, id_of }
}

/// Creates a mapper from a query returning any number of rows per identifier.
///
/// Rows are grouped by `id_of`, keeping query order within a group. Every
/// requested identifier gets an entry; those without rows get an empty vec.
pub fn one_to_many<ID, V, E, Q, K, Fut>(query: Q, id_of: K) -> OneToMany<Q, K>
where
    Q: Fn(Vec<ID>) -> Fut,
    Fut: Future<Output = Result<Vec<V>, E>>,
    K: Fn(&V) -> ID,
{
    OneToMany { query, id_of }
}

pub struct FromFn<F> {
    f: F,
}

pub struct FromAsyncFn<F> {
    f: F,
}

pub struct OneToOne<Q, K> {
    query: Q,
    id_of: K,
}

pub struct OneToMany<Q, K> {
    query: Q,
    id_of: K,
}

#[async_trait]
impl<ID, V, E, F> Mapper<ID> for FromFn<F>
where
    ID: Sync,
    V: Send + 'static,
    E: Into<MapperError>,
    F: Fn(&[ID]) -> Result<MapperResult<ID, V>, E> + Send + Sync + 'static,
{
    type Value = V;

    async fn map(&self, ids: &[ID]) -> Result<MapperResult<ID, V>, MapperError> {
        (self.f)(ids).map_err(Into::into)
    }
}

#[async_trait]
impl<ID, V, E, F, Fut> Mapper<ID> for FromAsyncFn<F>
where
    ID: Clone + Sync,
    V: Send + 'static,
    E: Into<MapperError>,
    F: Fn(Vec<ID>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<MapperResult<ID, V>, E>> + Send,
{
    type Value = V;

    async fn map(&self, ids: &[ID]) -> Result<MapperResult<ID, V>, MapperError> {
        (self.f)(ids.to_vec()).await.map_err(Into::into)
    }
}

#[async_trait]
impl<ID, V, E, Q, K, Fut> Mapper<ID> for OneToOne<Q, K>
where
    ID: Eq + Hash + Clone + Send + Sync,
    V: Send + 'static,
    E: Into<MapperError>,
    Q: Fn(Vec<ID>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<V>, E>> + Send,
    K: Fn(&V) -> ID + Send + Sync + 'static,
{
    type Value = V;

    async fn map(&self, ids: &[ID]) -> Result<MapperResult<ID, V>, MapperError> {
        let rows = (self.query)(ids.to_vec()).await.map_err(Into::into)?;

        Ok(rows
            .into_iter()
            .map(|row| ((self.id_of)(&row), row))
            .collect())
    }
}

#[async_trait]
impl<ID, V, E, Q, K, Fut> Mapper<ID> for OneToMany<Q, K>
where
    ID: Eq + Hash + Clone + Send + Sync,
    V: Send + 'static,
    E: Into<MapperError>,
    Q: Fn(Vec<ID>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<V>, E>> + Send,
    K: Fn(&V) -> ID + Send + Sync + 'static,
{
    type Value = Vec<V>;

    async fn map(&self, ids: &[ID]) -> Result<MapperResult<ID, Vec<V>>, MapperError> {
        let rows = (self.query)(ids.to_vec()).await.map_err(Into::into)?;

        let mut grouped: MapperResult<ID, Vec<V>> =
            ids.iter().map(|id| (id.clone(), Vec::new())).collect();

        for row in rows {
            grouped.entry((self.id_of)(&row)).or_default().push(row);
        }

        Ok(grouped)
    }
}

macro_rules! impl_debug {
    ( $( $name:ident < $( $p:ident ),+ > ),+ ) => {
        $(
            impl< $( $p ),+ > fmt::Debug for $name< $( $p ),+ > {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($name)).finish_non_exhaustive()
                }
            }
        )+
    };
}

impl_debug!(FromFn<F>, FromAsyncFn<F>, OneToOne<Q, K>, OneToMany<Q, K>);
