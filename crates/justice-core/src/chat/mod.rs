//! Chat orchestration: per-session history and the request handler.

pub mod service;
pub mod session;
