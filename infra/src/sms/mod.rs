//! Outbound SMS transport and response classification

pub mod classify;
pub mod transport;

pub use transport::HttpSmsSender;

#[cfg(test)]
mod tests;
