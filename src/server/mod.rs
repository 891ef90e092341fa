//! Listening socket setup and the accept loop.

pub mod listener;

pub use listener::{bind, run, Server};
