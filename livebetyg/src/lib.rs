//! Live rating pipeline for the Laserhuset site: scrape the Bokadirekt
//! listing page for the visible rating widget, serve the numbers as a small
//! JSON snapshot, and patch that snapshot back into statically rendered
//! pages.
//!
//! Extraction is a deliberate best-effort heuristic over one fixed page,
//! not a general scraper. When the upstream markup stops matching, every
//! layer degrades to the compiled-in fallback values instead of failing.

pub mod common;
pub mod microdata;
pub mod modules;
pub mod presenter;
pub mod snapshot;

pub use chrono;
