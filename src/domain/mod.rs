//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod action;
pub mod entities;
pub mod remotes;

pub use action::{decide, Action, Invocation};
pub use entities::*;
pub use remotes::{parse_remotes, RemoteName};
