//! Business logic and port definitions for the Justice backend.
//!
//! This crate defines the "ports" (provider traits) that the infrastructure
//! layer implements, plus the prompt chains, session store, and chat service
//! built on top of them. It depends only on `justice-types` -- never on
//! `justice-infra` or any database/IO crate.

pub mod chain;
pub mod chat;
pub mod llm;
pub mod retrieval;

#[cfg(test)]
mod test_support;
