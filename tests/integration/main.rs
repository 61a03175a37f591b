//! Integration tests against a running server and a live PostgreSQL.
//!
//! Run with: cargo test --test integration -- --ignored

mod api_tests;
mod repository_tests;
