//! Storage-domain contracts and in-memory adapters.

pub mod prefs;
