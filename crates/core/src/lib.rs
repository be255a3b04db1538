//! Jharkhand Tourism Core - Shared domain types.
//!
//! This crate provides the types used by the `web` binary and its tests:
//! - user identity (`UserId`, `Role`)
//! - feedback sentiment (`SentimentScore`, `SentimentBucket`, `SentimentSummary`)
//! - marketplace prices (`Price`)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. Everything that talks to the hosted database, the identity
//! provider or the language model lives in the `web` crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
