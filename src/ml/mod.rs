//! Machine-learning support for the candy pipeline.
//!
//! Scaling transforms and the agglomerative clustering routine the
//! processor builds on. Everything here works on plain tables and
//! row-major float matrices; no model persistence.

pub mod clustering;
pub mod preprocessing;
