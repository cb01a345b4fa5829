//! Demo HTTP host that mounts the request logger in front of a health endpoint.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
