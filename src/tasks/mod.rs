//! Background Tasks Module
//!
//! # Tasks
//! - Cache sweep: removes expired entries from a `MemoryCache` at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
