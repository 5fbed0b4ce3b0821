//! Transport utilities

pub mod http;

pub use http::{HttpClient, RawResponse, Transport};
