use super::Error;
use crate::MapperError;

/// Error raised by the supplier of top-level entities.
#[derive(Debug)]
pub(super) struct SupplierFailedError {
    pub(super) inner: MapperError,
}

impl std::error::Error for SupplierFailedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for SupplierFailedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "entity supplier failed: {}", self.inner)
    }
}

impl Error {
    /// Wraps a failure raised while supplying the entities to assemble.
    pub fn supplier_failed(err: impl Into<MapperError>) -> Error {
        Error::from(super::ErrorKind::SupplierFailed(SupplierFailedError {
            inner: err.into(),
        }))
    }

    /// Returns `true` if the entity supplier failed.
    pub fn is_supplier_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::SupplierFailed(_))
    }
}
