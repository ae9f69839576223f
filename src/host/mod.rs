//! Concrete [`Host`](crate::traits::Host) backends.
//!
//! * [`recording`]: keeps bindings in memory, resolving re-binds the way the
//!   real host does.
//! * [`slate`]: writes a Slate JavaScript config that registers every
//!   binding when Slate loads it.

pub mod recording;
pub mod slate;
