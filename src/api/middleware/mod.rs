//! HTTP middleware for the demo host.

pub mod logging;
