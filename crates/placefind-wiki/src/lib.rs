//! Encyclopedia lookups against the `MediaWiki` Action API.
//!
//! [`WikiClient`] speaks the HTTP protocol; [`Resolver`] turns a place-name
//! [`placefind_core::Query`] into a [`placefind_core::ResolutionResult`].

pub mod client;
mod disambiguation;
pub mod error;
mod pacing;
pub mod resolver;
pub mod types;

pub use client::WikiClient;
pub use error::WikiError;
pub use resolver::{Resolver, SUMMARY_SENTENCES};
