mod error;
pub use error::{Error, IntoError};

pub mod mapper;
pub use mapper::{DynMapper, Mapper, MapperError, MapperResult};

/// A Result type alias that uses the assembler's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
