//! Development server for pagepack build output.
//!
//! Serves the build output directory as static files next to a pair of
//! canned routes used while wiring up the front end.

pub mod server;

pub use server::{router, DevServer, DevServerConfig, ServerError};
