//! In-memory storage backends for the commentd comment store.
//!
//! `MemoryCommentDatabase` and `MemoryCommentCache` implement the storage
//! traits over concurrent maps. They back the test suites — operation
//! counters let tests assert which backend actually served a call, and fault
//! toggles drive the failure paths — and the cache doubles as the
//! single-instance cache tier when Redis is disabled.

pub mod cache;
pub mod storage;

pub use cache::MemoryCommentCache;
pub use storage::MemoryCommentDatabase;
