//! # Overlay Discovery Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── doubles.rs        # Ledger, wallet, bundle codec and resolver doubles
//! └── integration/      # Cross-subsystem flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ov-tests
//! cargo test -p ov-tests integration::
//!
//! # Benchmarks
//! cargo bench -p ov-tests
//! ```

pub mod doubles;
pub mod integration;
