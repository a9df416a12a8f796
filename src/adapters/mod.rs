//! Adapters implementing the persistence port.
//!
//! Environment adapters live in [`crate::frozen_lake`] and
//! [`crate::cargo_world`].

pub mod in_memory_repository;
pub mod msgpack_repository;

pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;
