//! Integration test modules


mod squash_determinism;
mod walk_output;
