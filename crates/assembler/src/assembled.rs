use assembler_core::Result;

use std::{
    collections::VecDeque,
    fmt,
    pin::Pin,
    task::{Context, Poll},
};
use tokio_stream::{Stream, StreamExt};

/// A stream of assembled objects, as produced by the
/// [`Streaming`](crate::Streaming) adapter.
///
/// Items come out in entity order. An item is either an assembled object or
/// the error that ended the assembly.
pub struct Assembled<R> {
    buffer: VecDeque<R>,
    stream: Option<DynStream<R>>,
}

/// Collections that [`Assembled::collect`] can gather items into.
pub trait FromAssembled<A>: Extend<A> + Default {}

impl<A, T: Extend<A> + Default> FromAssembled<A> for T {}

type DynStream<R> = Pin<Box<dyn Stream<Item = Result<R>> + Send + 'static>>;

impl<R> Assembled<R> {
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<R>> + Send + 'static,
    {
        Self {
            buffer: VecDeque::new(),
            stream: Some(Box::pin(stream)),
        }
    }

    pub fn from_vec(items: Vec<R>) -> Self {
        Self {
            buffer: items.into(),
            stream: None,
        }
    }

    /// Returns the next assembled object
    pub async fn next(&mut self) -> Option<Result<R>> {
        StreamExt::next(self).await
    }

    /// Peek at the next assembled object
    pub async fn peek(&mut self) -> Option<Result<&R>> {
        if self.buffer.is_empty() {
            match self.next().await {
                Some(Ok(item)) => self.buffer.push_back(item),
                Some(Err(e)) => return Some(Err(e)),
                None => return None,
            }
        }

        self.buffer.front().map(Ok)
    }

    /// The stream will yield at least this number of items
    pub fn min_len(&self) -> usize {
        let (ret, _) = self.size_hint();
        ret
    }

    /// Collect all assembled objects, stopping at the first error
    pub async fn collect<B>(mut self) -> Result<B>
    where
        B: FromAssembled<R>,
    {
        let mut ret = B::default();

        while let Some(res) = self.next().await {
            ret.extend(Some(res?));
        }

        Ok(ret)
    }
}

impl<R> Unpin for Assembled<R> {}

impl<R> Stream for Assembled<R> {
    type Item = Result<R>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(next) = self.buffer.pop_front() {
            Poll::Ready(Some(Ok(next)))
        } else if let Some(stream) = self.stream.as_mut() {
            stream.as_mut().poll_next(cx)
        } else {
            Poll::Ready(None)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (mut low, mut high) = match &self.stream {
            Some(stream) => stream.size_hint(),
            None => (0, Some(0)),
        };

        let buffered = self.buffer.len();

        low += buffered;

        if let Some(high) = high.as_mut() {
            *high += buffered;
        }

        (low, high)
    }
}

impl<R> From<Vec<R>> for Assembled<R> {
    fn from(items: Vec<R>) -> Self {
        Self::from_vec(items)
    }
}

impl<R> Default for Assembled<R> {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl<R> fmt::Debug for Assembled<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assembled")
            .field("buffered", &self.buffer.len())
            .field("streaming", &self.stream.is_some())
            .finish()
    }
}
