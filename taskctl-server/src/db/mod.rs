//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One pool created at startup, shared by handle - no per-request connects
//! - Connections are borrowed per statement and returned on every exit path
//! - Rely on DB constraints; no check-then-write
//! - Schema is created explicitly before serving, never at import time

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::create_pool;
pub use repos::*;
pub use schema::init_schema;
