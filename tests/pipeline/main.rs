//! Pipeline tests over realistic two-switch dumps
//!
//! Run with: cargo test --test pipeline

mod dumps;
mod properties;
mod scenarios;
