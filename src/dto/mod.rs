//! Wire-level data transfer objects exchanged with the remote authority.

pub mod auth;
pub mod game;
pub mod settings;
pub mod stats;
