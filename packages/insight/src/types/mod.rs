//! Domain types for product search and retrieval.

pub mod config;
pub mod document;
pub mod product;
pub mod search;
pub mod sentiment;
pub mod summary;
pub mod user;
