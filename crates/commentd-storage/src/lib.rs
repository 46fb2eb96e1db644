//! Backend abstractions for the commentd data-access layer.
//!
//! Defines the error type every storage operation returns, the traits the
//! relational and cache backends implement, and the canonical binary codec
//! for cache payloads. Backends live in their own crates; the data-access
//! layer depends only on this one.

pub mod codec;
pub mod error;
pub mod traits;

pub use codec::{decode_comment, decode_list, encode_comment, encode_list};
pub use error::{ErrorKind, StoreError};
pub use traits::{CommentCache, CommentDatabase};
