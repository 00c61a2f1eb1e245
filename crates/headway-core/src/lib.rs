//! Core types and utilities for `headway`.
//!
//! This crate provides the node arena and node pool used during search, the open lists that order
//! expansion, and the traits that connect a search to its state space.

mod hash_pool;
mod node;
mod pqueue;
mod scan_queue;
pub mod traits;

pub use crate::hash_pool::*;
pub use crate::node::*;
pub use crate::pqueue::*;
pub use crate::scan_queue::*;
