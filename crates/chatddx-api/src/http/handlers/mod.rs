//! Route handlers.

pub mod page;
pub mod proxy;
pub mod relay;
