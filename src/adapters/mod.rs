//! 對外部系統的具體實作

pub mod http;

pub use http::HttpBackend;
