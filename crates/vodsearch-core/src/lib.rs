//! Search engine logic and backend trait definitions for vodsearch.
//!
//! This crate defines the "ports" (`Embedder`, `VectorIndex`,
//! `SnapshotStore`) that the infrastructure layer implements. It depends
//! only on `vodsearch-types` -- never on `vodsearch-infra` or any I/O crate.

pub mod search;
