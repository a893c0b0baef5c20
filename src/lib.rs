//! Console Blog Client
//!
//! A small blog kept in a single JSON snapshot file.
//!
//! Layers:
//! - [`post`]: the in-memory post and its stored record
//! - [`store`]: load/save/search/delete over the whole snapshot
//! - [`config`]: where the snapshot lives
//! - [`render`]: table and full-post formatting
//! - [`commands`]: the CLI actions, written against an output sink

pub mod commands;
pub mod config;
pub mod post;
pub mod render;
pub mod store;

pub use config::BlogConfig;
pub use post::{Post, PostRecord};
pub use store::{PostStore, Posts, StoreError};
