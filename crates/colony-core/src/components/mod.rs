//! Components
//!
//! Data types for agents, roster entries, and the world objects seen
//! through the facade.

pub mod agent;
pub mod roster;
pub mod world;

pub use agent::*;
pub use roster::*;
pub use world::*;
