//! Property-based tests

mod version_proptest;
