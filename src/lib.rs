//! Plinth - minimal static file server
//!
//! Core library for the connection loop, request resolution and response framing.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
