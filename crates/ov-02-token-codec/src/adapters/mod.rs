//! Codec implementations.

pub mod pushdrop;
