#![forbid(unsafe_code)]

//! `selkie` builds Mermaid diagrams programmatically.
//!
//! Elements (nodes, links, notes, class definitions, Gantt spans) are
//! created inside a [`Graph`], configured through chained typed property
//! calls, and rendered to Mermaid text, optionally wrapped in a markdown
//! fence. The library is write-only: it emits diagram source and never
//! parses it back.
//!
//! See the crate examples for a flowchart, a sequence diagram and a Gantt
//! chart built end to end.

pub use selkie_core::*;
