use super::Error;
use crate::MapperError;

/// Error raised by a mapper while computing its result map.
///
/// This is what the default error converter produces. The underlying failure is
/// kept intact and returned from [`std::error::Error::source`].
#[derive(Debug)]
pub(super) struct MapperInvocationError {
    pub(super) inner: MapperError,
}

impl std::error::Error for MapperInvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for MapperInvocationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "mapper invocation failed: {}", self.inner)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Wraps a failure raised by a mapper.
    ///
    /// This is the default error converter of every assembler.
    pub fn mapper_invocation(err: MapperError) -> Error {
        Error::from(super::ErrorKind::MapperInvocation(MapperInvocationError {
            inner: err,
        }))
    }

    /// Returns `true` if this error wraps a mapper failure.
    pub fn is_mapper_invocation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MapperInvocation(_))
    }
}
