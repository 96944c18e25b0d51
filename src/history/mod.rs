//! Persisted counter history used for rate derivation.
//!
//! The history is a flat JSON object keyed by [`MetricIdentity`](crate::metric::MetricIdentity):
//!
//! ```json
//! {"bytes_sent-interface=eno1":{"value":12345676.0,"timestamp":1639776815123}}
//! ```
//!
//! It is read once at the start of a pass and replaced once at the end. A missing
//! file is an empty history. Nothing is ever pruned, so identities of interfaces that
//! disappeared stay in the file.
//!
//! Writes go through [`fsutil::replace_file`](crate::fsutil::replace_file), so a crash
//! never leaves a truncated file behind. There is no locking: two passes sharing one
//! file race, and the last one to finish wins.
mod error;
mod store;

pub use error::{Error, Result};
pub use store::{CounterHistoryRecord, CounterHistoryStore};
