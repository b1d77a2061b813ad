//! Data models for Codewar

mod room;
mod team;

pub use room::*;
pub use team::*;
