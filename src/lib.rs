//! # rstree
//!
//! A converter between flat rs3 discourse annotations and RST constituency
//! trees.
//!
//! The flat side is the rs3 body: segments and groups pointing at parents
//! through relation names. The nested side is the constituency tree with
//! nuclearity markers on its nodes and EDU texts on its leaves. The [rs3]
//! module holds both directions of the codec plus the structured-document
//! interchange around them.
//!
//! ## Testing
//!
//! Structural assertions over trees and the round-trip equivalence check
//! live in [rs3::testing]; tests should use them instead of hand-rolled
//! pattern matching.

pub mod rs3;
