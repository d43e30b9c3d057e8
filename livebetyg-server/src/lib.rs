//! HTTP endpoint wrapping the rating fetcher.
//!
//! One route that always answers 200 with a usable snapshot, plus a health
//! probe. Edge caching is steered entirely through the `Cache-Control`
//! header on the live arm; the server itself keeps no state.

pub mod routes;
