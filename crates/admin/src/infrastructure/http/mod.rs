//! HTTP adapters for the back-office API

mod client;

pub use client::BackofficeApiClient;
