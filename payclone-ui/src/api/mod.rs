//! API Module
//!
//! HTTP client for the payments REST API.

mod client;

pub use client::*;
