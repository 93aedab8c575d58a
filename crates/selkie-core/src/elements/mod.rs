//! Built-in diagram element kinds.
//!
//! Each kind is an ordinary [`GraphObject`](crate::object::GraphObject)
//! implementation plus the property types it understands; new kinds can
//! be added outside this crate without touching the container.

pub mod class_def;
pub mod link;
pub mod node;
pub mod note;
pub mod span;

pub use class_def::{ClassDef, Color, Fill, Stroke};
pub use link::{Activation, LineStyle, Link, LinkStyle, Source, Target};
pub use node::{Node, Shape, SubgraphMembers};
pub use note::{Basis, Note, NoteSide, Side};
pub use span::{DateDuration, DateTick, Span, SpanWindow};
