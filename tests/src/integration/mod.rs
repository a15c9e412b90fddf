//! # Integration Tests
//!
//! Advertisements travel the whole path: wallet → bundle → admission →
//! lookup → discovery → revocation.

pub mod lifecycle;
