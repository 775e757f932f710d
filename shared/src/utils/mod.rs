//! Utility functions shared across the server

pub mod phone;
