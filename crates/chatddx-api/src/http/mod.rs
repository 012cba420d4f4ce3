//! HTTP layer: router, handlers, the session extractor and error mapping.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
