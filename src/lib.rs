//! `versicle` - scripture lookup and search over a static corpus.
//!
//! The corpus (book -> chapter -> verse) is loaded wholesale at startup
//! and never mutated. The core pipeline runs raw reference strings through
//! the parser, the fuzzy book resolver, and the range-validated lookup
//! engine; search, daily verse, and bookmarks sit alongside it. The core
//! performs no terminal I/O: prompts and rendering belong to the binary.

// Re-export public modules for use in integration tests and as a library
pub mod bookmarks;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod daily;
pub mod error;
pub mod lookup;
pub mod reference;
pub mod render;
pub mod resolve;
pub mod search;
