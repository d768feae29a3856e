//! HTTP service implementations.

pub mod quotes;

pub use quotes::QuoteService;
