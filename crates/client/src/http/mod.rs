//! HTTP transport layer.
//!
//! A thin wrapper around `reqwest` that applies bounded timeouts and maps
//! transport failures into domain errors at the boundary.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
