//! Beacon - Minimal HTTP/1.1 file and echo server
//!
//! Core library for request parsing, routing, and response framing.

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod routing;
pub mod server;
