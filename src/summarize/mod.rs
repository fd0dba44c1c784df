//! Summarization pipelines
//!
//! Three ways to turn an export into prose: the chronicle walks the whole
//! history through chunk, group and final stages; the topic pipeline
//! summarizes everything said about given topics; the discussion pipeline
//! summarizes a span addressed by message links.

pub mod chronicle;
pub mod chunks;
pub mod discussion;
pub mod prompts;
pub mod topic;

pub use chronicle::{ChronicleOptions, Chronicler};
pub use chunks::chunk_fingerprint;
pub use discussion::{summarize_discussion, DEFAULT_INSTRUCTIONS};
pub use topic::{summarize_topics, TopicOptions, TopicReport};
