#![forbid(unsafe_code)]

//! Typed object/property/graph model for building Mermaid diagram text.
//!
//! Callers assemble a [`Graph`] of elements (nodes, links, notes, class
//! definitions, Gantt spans), configure each through chained typed
//! [`set`](object::PropertyHost::set) calls, and render the container to
//! Mermaid source in one pass:
//!
//! ```
//! use selkie_core::elements::{Link, Node, Source, Target};
//! use selkie_core::graph::{FlowDirection, Graph, OutputFormat};
//! use selkie_core::object::{GraphObject, Name, PropertyHost};
//!
//! # fn main() -> selkie_core::Result<()> {
//! let mut graph: Graph = Graph::new();
//! graph
//!     .set(FlowDirection::LeftRight)?
//!     .set(OutputFormat::Mermaid)?;
//!
//! let a = graph.new_object::<Node<u32>>();
//! a.set(Name::new("A"))?;
//! let a = a.handle().clone();
//! let b = graph.new_object::<Node<u32>>();
//! b.set(Name::new("B"))?;
//! let b = b.handle().clone();
//!
//! graph
//!     .new_object::<Link<u32>>()
//!     .set(Source(a))?
//!     .set(Target(b))?;
//!
//! assert_eq!(
//!     graph.render()?,
//!     "flowchart LR\n\
//!      0@{ shape: rect, label: \"A\" }\n\
//!      1@{ shape: rect, label: \"B\" }\n\
//!      0-->1\n",
//! );
//! # Ok(())
//! # }
//! ```
//!
//! The library is write-only (no parsing back), performs no layout, and
//! is single-threaded; rendering is a pure function of the current
//! element collection and the diagram-type context.

pub mod diagram;
pub mod elements;
pub mod error;
pub mod graph;
pub mod handle;
pub mod object;
pub mod property;
pub mod tag;

pub use diagram::DiagramType;
pub use elements::{
    Activation, Basis, ClassDef, Color, DateDuration, DateTick, Fill, LineStyle, Link, LinkStyle,
    Node, Note, NoteSide, Shape, Side, Source, Span, SpanWindow, Stroke, SubgraphMembers, Target,
};
pub use error::{Error, Result};
pub use graph::{AutoNumber, FlowDirection, Graph, GraphKind, OutputFormat};
pub use handle::{Handle, HandleDomain, HandleManager, OpaqueId};
pub use object::{ElementKind, GraphObject, Name, Printable, PropertyHost};
pub use property::{Property, PropertyId, PropertyLink, PropertyOf, PropertyStore};
pub use tag::{TypeTag, short_type_name, type_tag};
