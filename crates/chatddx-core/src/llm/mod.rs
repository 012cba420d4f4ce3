//! Chat-completion provider port and completion request building.

pub mod provider;
pub mod request;
