//! Container-ready todo CRUD API.
//!
//! This library implements a minimal HTTP service exposing create, read,
//! update, and delete operations over a single resource type ("todo items"),
//! backed by process-local memory. It ships the liveness/readiness signaling
//! a container workload needs; nothing survives a restart.
//!
//! # Request flow
//!
//! ```text
//! inbound request
//!   └─ handler validates input
//!        └─ TodoStore mutates/reads the collection
//!             └─ result wrapped into the {success, data, message, error} envelope
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: API error types and their response mapping
//! - [`todo`]: Resource model and in-memory store
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus counters

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod todo;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use todo::TodoStore;
