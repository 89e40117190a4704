use assembler::{async_trait, Mapper, MapperError, MapperResult};
use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex},
    time::Duration,
};

/// A mapper backed by a fixed table that logs every invocation.
#[derive(Debug)]
pub struct RecordingMapper<ID, V> {
    table: HashMap<ID, V>,

    /// Sleep this long before answering. Needs a Tokio runtime when set.
    delay: Option<Duration>,

    /// Identifiers received, one entry per invocation
    calls: CallLog<ID>,
}

/// Shared handle on the invocations of a [`RecordingMapper`].
#[derive(Debug)]
pub struct CallLog<ID> {
    calls: Arc<Mutex<Vec<Vec<ID>>>>,
}

/// A mapper that always fails with a connection error.
#[derive(Debug, Default)]
pub struct FailingMapper;

impl<ID, V> RecordingMapper<ID, V>
where
    ID: Eq + Hash,
{
    pub fn new(table: impl IntoIterator<Item = (ID, V)>) -> Self {
        RecordingMapper {
            table: table.into_iter().collect(),
            delay: None,
            calls: CallLog {
                calls: Arc::new(Mutex::new(Vec::new())),
            },
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get a handle to access the invocation log
    pub fn calls(&self) -> CallLog<ID> {
        CallLog {
            calls: self.calls.calls.clone(),
        }
    }
}

impl<ID: Clone> CallLog<ID> {
    /// Number of times the mapper was invoked
    pub fn count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }

    /// Identifiers of every invocation, oldest first
    pub fn all(&self) -> Vec<Vec<ID>> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

#[async_trait]
impl<ID, V> Mapper<ID> for RecordingMapper<ID, V>
where
    ID: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    type Value = V;

    async fn map(&self, ids: &[ID]) -> Result<MapperResult<ID, V>, MapperError> {
        self.calls
            .calls
            .lock()
            .expect("call log poisoned")
            .push(ids.to_vec());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(ids
            .iter()
            .filter_map(|id| Some((id.clone(), self.table.get(id)?.clone())))
            .collect())
    }
}

#[async_trait]
impl<ID> Mapper<ID> for FailingMapper
where
    ID: Sync + 'static,
{
    type Value = String;

    async fn map(&self, _ids: &[ID]) -> Result<MapperResult<ID, String>, MapperError> {
        Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "billing service unreachable",
        )
        .into())
    }
}
