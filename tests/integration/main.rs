//! End-to-end tests driving the full Atlas router against the in-memory store.

mod collection_test;
mod helpers;
mod page_test;
mod resource_test;
mod suggestion_test;
