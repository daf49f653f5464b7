//! Integration tests

pub mod database;
