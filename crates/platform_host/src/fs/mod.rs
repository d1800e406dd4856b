//! Virtual file-system helpers shared by host adapters and the desktop runtime.

pub mod path;
