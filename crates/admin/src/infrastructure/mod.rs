//! Infrastructure layer - adapters for the outbound ports

pub mod http;
pub mod navigation;
pub mod platform;

#[cfg(test)]
pub mod testing;
