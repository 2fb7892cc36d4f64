//! Version descriptor and supporting infrastructure

pub mod error;
pub mod error_handling;
pub mod logging;
pub mod requirement;
pub mod styles;
pub mod version;
