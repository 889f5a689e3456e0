//! Elector roll duplicate finder
//!
//! Fuzzy-matches elector names between two roll snapshots (2025_LIST and
//! 2002_LIST) to find people present in both, tolerating word reordering
//! and Telugu/English transliteration spelling drift.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod matcher;
