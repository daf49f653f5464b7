//! Store-level tests that bypass HTTP

mod cache_consistency_test;
mod revisions_test;
