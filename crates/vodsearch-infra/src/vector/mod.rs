//! Vector search infrastructure: the flat L2 index and fastembed-based
//! local embedding generation.

pub mod embedder;
pub mod flat;
