//! Integration tests: the full router against an in-memory store

mod api_tests;
mod common;
mod ledger_tests;
