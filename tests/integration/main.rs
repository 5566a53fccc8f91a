//! Integration Tests
//!
//! End-to-end tests through the public `fixturedb` API:
//! - Reference load: counts, summary, round trip by URI
//! - Reload: idempotence of counts under each duplicate policy
//! - Collisions and failure isolation across batches

#[path = "../common/mod.rs"]
mod common;

mod collisions;
mod reference_load;
mod reload;
