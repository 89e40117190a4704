//! Join the results of independent batch lookups back onto top-level
//! entities.
//!
//! An [`Assembler`] extracts an identifier from every entity, hands the full
//! identifier list to each [`Mapper`], and calls a builder once per entity
//! with whatever each mapper found for it. An [`AssemblerAdapter`] decides
//! how the mappers run and what container the caller gets back.

pub mod adapter;
pub use adapter::{AssemblerAdapter, Blocking, Concurrent, Parallel, Streaming};

pub mod assembled;
pub use assembled::Assembled;

mod assembler;
pub use assembler::Assembler;

pub mod builder;
pub use builder::assembler_of;

mod engine;
pub use engine::{
    DomainObjectBuilder, ErrorConverter, IdExtractor, Joined, MapperSource, MapperSources,
};

pub mod mapper;

pub mod rules;
pub use rules::{AnyValue, IntoRules};

pub use assembler_core::{
    async_trait, bail, err, DynMapper, Error, IntoError, Mapper, MapperError, MapperResult,
    Result,
};
