//! Nodes: flowchart boxes / sequence participants, plus flowchart
//! `subgraph` grouping.

use crate::diagram::DiagramType;
use crate::error::{Error, Result};
use crate::handle::{Handle, HandleDomain};
use crate::object::{GraphObject, Name, Printable, PropertyHost};
use crate::property::{Property, PropertyOf, PropertyStore};
use crate::tag::short_type_name;
use std::any::Any;

/// Node outline, written with Mermaid's `@{ shape: … }` keywords.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    #[default]
    Rectangle,
    RoundRectangle,
    Diamond,
    Parallelogram,
    Stadium,
    Subprocess,
    Cylinder,
    Circle,
    LeanLeft,
    LeanRight,
}

impl Shape {
    fn keyword(self) -> &'static str {
        match self {
            Shape::Rectangle => "rect",
            Shape::RoundRectangle => "roundrect",
            Shape::Diamond => "diamond",
            Shape::Parallelogram => "parallelogram",
            Shape::Stadium => "stadium",
            Shape::Subprocess => "subproc",
            Shape::Cylinder => "cyl",
            Shape::Circle => "circle",
            Shape::LeanLeft => "lean-l",
            Shape::LeanRight => "lean-r",
        }
    }
}

impl Property for Shape {
    fn render(&self, diagram: DiagramType) -> String {
        match diagram {
            DiagramType::Flowchart => self.keyword().to_string(),
            _ => String::new(),
        }
    }

    fn render_unset(diagram: DiagramType) -> Option<String> {
        Some(Shape::default().render(diagram))
    }
}

impl<U: HandleDomain> PropertyOf<Node<U>> for Shape {}

/// Handles of the nodes grouped under this node's `subgraph` block.
///
/// Presence switches the node's flowchart form from a shape line to a
/// `subgraph … end` block; the members still render their own lines.
#[derive(Clone, Debug)]
pub struct SubgraphMembers<U: HandleDomain>(pub Vec<Handle<U>>);

impl<U: HandleDomain> Default for SubgraphMembers<U> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<U: HandleDomain> Property for SubgraphMembers<U> {}

impl<U: HandleDomain> PropertyOf<Node<U>> for SubgraphMembers<U> {}

#[derive(Debug)]
pub struct Node<U: HandleDomain> {
    handle: Handle<U>,
    props: PropertyStore,
}

impl<U: HandleDomain> PropertyHost for Node<U> {
    fn store(&self) -> &PropertyStore {
        &self.props
    }

    fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.props
    }
}

impl<U: HandleDomain> GraphObject<U> for Node<U> {
    fn fresh(handle: Handle<U>) -> Self {
        let mut props = PropertyStore::default();
        props.insert(Printable);
        Self { handle, props }
    }

    fn handle(&self) -> &Handle<U> {
        &self.handle
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn render_body(&self, diagram: DiagramType) -> Result<String> {
        match diagram {
            DiagramType::Flowchart => {
                if let Ok(members) = self.store().get::<SubgraphMembers<U>>() {
                    let mut out = format!(
                        "subgraph {}[\"{}\"]\n",
                        self.handle.render(diagram),
                        self.store().render_property::<Name>(diagram),
                    );
                    for member in &members.0 {
                        out.push_str(&member.render(diagram));
                        out.push('\n');
                    }
                    out.push_str("end");
                    Ok(out)
                } else {
                    let name = self.store().get::<Name>()?;
                    Ok(format!(
                        "{}@{{ shape: {}, label: \"{}\" }}",
                        self.handle.render(diagram),
                        self.store().render_property::<Shape>(diagram),
                        name.0,
                    ))
                }
            }
            DiagramType::Sequence => {
                let name = self.store().get::<Name>()?;
                Ok(format!(
                    "participant {} as {}",
                    self.handle.render(diagram),
                    name.0,
                ))
            }
            DiagramType::Gantt => Err(Error::UnsupportedDiagramType {
                element: short_type_name::<Self>(),
                diagram,
            }),
        }
    }
}
