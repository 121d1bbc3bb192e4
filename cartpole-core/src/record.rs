//! Types and traits for recording metrics of rollouts.
//!
//! * [`Record`] - A container for key-value pairs of various data types
//! * [`RecordValue`] - The values that can be stored in a [`Record`]
//! * [`Recorder`] - Writes records to an output destination
//! * [`AggregateRecorder`] - Stores records and writes aggregated values on flush
//! * [`RecordStorage`] - Aggregation of stored records
//! * [`BufferedRecorder`] - Keeps records in memory
//! * [`NullRecorder`] - Discards all records
//!
//! ```rust
//! use cartpole_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(3.0));
//! record.insert("episode_return", RecordValue::Scalar(42.0));
//! record.insert("policy", RecordValue::String("heuristic".to_string()));
//! assert_eq!(record.len(), 3);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
