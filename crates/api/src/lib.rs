//! Cromos Denea webhook server library.
//!
//! Exposes the building blocks (config, state, error handling, handlers,
//! router) so integration tests and the binary entrypoint both drive the
//! exact same middleware stack.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
