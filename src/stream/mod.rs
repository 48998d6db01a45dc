//! Stream operators applied to the produced triples.
//!
//! - **DedupWindow** - suppresses triples already accepted within the last W accepted ones

pub mod dedup_window;

pub use dedup_window::DedupWindow;
