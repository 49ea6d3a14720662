//! Fuzzing library for arxiv-mistral-mcp.
//!
//! This crate provides fuzzing targets for the parsers that see untrusted
//! input: the arXiv Atom feed parser, identifier normalization, tool argument
//! deserialization and JSON-RPC request lines.
//!
//! # Usage
//!
//! ```bash
//! cd crates/arxiv-mcp-fuzz
//! cargo +nightly fuzz run fuzz_atom_parse -- -max_total_time=60
//! ```

pub use arxiv_mistral_mcp::{client, formatters, models, server};
