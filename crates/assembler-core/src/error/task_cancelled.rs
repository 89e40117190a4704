use super::Error;

/// Error when a spawned mapper task was cancelled before producing a result.
///
/// This happens when the runtime driving the task shuts down while the
/// assembly is still in flight.
#[derive(Debug)]
pub(super) struct TaskCancelledError;

impl std::error::Error for TaskCancelledError {}

impl core::fmt::Display for TaskCancelledError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("mapper task cancelled")
    }
}

impl Error {
    /// Creates a task cancelled error.
    pub fn task_cancelled() -> Error {
        Error::from(super::ErrorKind::TaskCancelled(TaskCancelledError))
    }

    /// Returns `true` if this error is a task cancelled error.
    pub fn is_task_cancelled(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TaskCancelled(_))
    }
}
