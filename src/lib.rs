//! Chat Chronicler - turns chat exports into histories
//!
//! This library provides the core functionality for the chronicler:
//! - Loading Telegram JSON exports into an indexed message store
//! - Chunked whole-history summarization with on-disk caching
//! - Topic retrieval (exact matches, reply graph, conversation windows)
//! - Ad hoc discussion summaries addressed by message links
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  Export (result.json)                │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                 MessageStore                         │
//! │   id index  │  reply graph  │  chronological order  │
//! └──────┬──────────────┬───────────────────┬───────────┘
//!        │              │                   │
//! ┌──────▼─────┐ ┌──────▼──────┐ ┌──────────▼──────────┐
//! │ Chronicle  │ │    Topic    │ │     Discussion      │
//! │ chunks →   │ │ search →    │ │ link range →        │
//! │ groups →   │ │ windows →   │ │ render → summarize  │
//! │ final      │ │ summarize   │ │                     │
//! └──────┬─────┘ └──────┬──────┘ └──────────┬──────────┘
//!        │              │                   │
//! ┌──────▼──────────────▼───────────────────▼───────────┐
//! │        OpenAI-compatible chat completions API        │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod links;
pub mod llm;
pub mod render;
pub mod search;
pub mod setup;
pub mod store;
pub mod summarize;

pub use cache::SummaryCache;
pub use config::{Config, ModelTiers};
pub use error::{Error, Result};
pub use export::{load_export, ChatHistory, Message, UserMessage};
pub use links::{parse_message_link, MessageLink};
pub use llm::{ChatModel, OpenAiModel};
pub use render::RenderContext;
pub use search::{exact_matches, expand_reply_graph, expand_time_windows, select_relevant};
pub use store::MessageStore;
pub use summarize::{
    chunk_fingerprint, summarize_discussion, summarize_topics, ChronicleOptions, Chronicler,
    TopicOptions, TopicReport,
};
