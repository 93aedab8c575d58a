//! The owning container: a handle manager, an insertion-ordered element
//! collection, and the render orchestration.
//!
//! The graph is itself a property-bearing object: diagram kind, output
//! format and header flags are ordinary properties rendered through the
//! same protocol as its children.

use crate::diagram::DiagramType;
use crate::elements::{ClassDef, Link, Node, Note, Span};
use crate::error::{Error, Result};
use crate::handle::{Handle, HandleDomain, HandleManager};
use crate::object::{ElementKind, GraphObject, Printable, PropertyHost};
use crate::property::{Property, PropertyOf, PropertyStore};
use crate::tag::{TypeTag, short_type_name, type_tag};

/// Target diagram grammar for the whole graph. Present from construction
/// (defaulting to a flowchart); removing it makes rendering fail until it
/// is set again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphKind(pub DiagramType);

impl Property for GraphKind {
    fn render(&self, _diagram: DiagramType) -> String {
        self.0.keyword().to_string()
    }
}

impl<U: HandleDomain> PropertyOf<Graph<U>> for GraphKind {}

/// Outer wrapping of the rendered text. Unset behaves as markdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Mermaid,
    #[default]
    Markdown,
}

impl Property for OutputFormat {}

impl<U: HandleDomain> PropertyOf<Graph<U>> for OutputFormat {}

/// Flow direction emitted after the flowchart header keyword.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowDirection {
    #[default]
    TopDown,
    BottomUp,
    LeftRight,
    RightLeft,
}

impl FlowDirection {
    fn keyword(self) -> &'static str {
        match self {
            FlowDirection::TopDown => "TD",
            FlowDirection::BottomUp => "BT",
            FlowDirection::LeftRight => "LR",
            FlowDirection::RightLeft => "RL",
        }
    }
}

impl Property for FlowDirection {
    fn render(&self, diagram: DiagramType) -> String {
        match diagram {
            DiagramType::Flowchart => self.keyword().to_string(),
            _ => String::new(),
        }
    }

    fn render_unset(diagram: DiagramType) -> Option<String> {
        Some(FlowDirection::default().render(diagram))
    }
}

impl<U: HandleDomain> PropertyOf<Graph<U>> for FlowDirection {}

/// Sequence-diagram `autonumber` switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutoNumber(pub bool);

impl Property for AutoNumber {
    fn render(&self, diagram: DiagramType) -> String {
        match (diagram, self.0) {
            (DiagramType::Sequence, true) => "autonumber".to_string(),
            _ => String::new(),
        }
    }
}

impl<U: HandleDomain> PropertyOf<Graph<U>> for AutoNumber {}

/// Owning container for diagram elements over one identifier domain.
///
/// Elements live in insertion order (the order drives the emitted node
/// and link blocks) and every element's handle is tracked by the graph's
/// own [`HandleManager`]. Handles from a different graph instance resolve
/// to nothing meaningful; passing one is a caller error.
pub struct Graph<U: HandleDomain = u32> {
    handles: HandleManager<U>,
    elements: Vec<Box<dyn GraphObject<U>>>,
    props: PropertyStore,
}

impl<U: HandleDomain> PropertyHost for Graph<U> {
    fn store(&self) -> &PropertyStore {
        &self.props
    }

    fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.props
    }
}

impl<U: HandleDomain> Default for Graph<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: HandleDomain> Graph<U> {
    pub fn new() -> Self {
        let mut props = PropertyStore::default();
        props.insert(GraphKind::default());
        props.insert(Printable);
        Self {
            handles: HandleManager::new(),
            elements: Vec::new(),
            props,
        }
    }

    pub fn handle_manager(&self) -> &HandleManager<U> {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = &dyn GraphObject<U>> {
        self.elements.iter().map(|boxed| boxed.as_ref())
    }

    /// Creates an element at a freshly allocated handle and returns a
    /// mutable reference bound to the graph.
    pub fn new_object<T: GraphObject<U>>(&mut self) -> &mut T {
        let handle = self.handles.allocate();
        tracing::debug!(element = short_type_name::<T>(), handle = %handle, "new object");
        self.insert_element(T::fresh(handle))
    }

    /// Creates an element at a caller-supplied handle.
    pub fn new_object_at<T: GraphObject<U>>(&mut self, handle: Handle<U>) -> Result<&mut T> {
        if !self.handles.allocate_at(&handle) {
            return Err(Error::HandleInUse {
                handle: handle.to_string(),
            });
        }
        tracing::debug!(element = short_type_name::<T>(), handle = %handle, "new object at handle");
        Ok(self.insert_element(T::fresh(handle)))
    }

    fn insert_element<T: GraphObject<U>>(&mut self, mut element: T) -> &mut T {
        element.store_mut().insert(ElementKind(type_tag::<T>()));
        let index = self.elements.len();
        self.elements.push(Box::new(element));
        self.elements[index]
            .as_any_mut()
            .downcast_mut::<T>()
            .expect("downcast of freshly inserted element")
    }

    /// Looks up an element of a specific kind by handle.
    pub fn access<T: GraphObject<U>>(&self, handle: &Handle<U>) -> Result<&T> {
        let Some(element) = self.elements.iter().find(|e| e.handle() == handle) else {
            return Err(Error::InvalidHandle {
                handle: handle.to_string(),
            });
        };
        element
            .as_any()
            .downcast_ref::<T>()
            .ok_or(Error::WrongObjectType {
                handle: handle.to_string(),
                expected: short_type_name::<T>(),
            })
    }

    pub fn access_mut<T: GraphObject<U>>(&mut self, handle: &Handle<U>) -> Result<&mut T> {
        let Some(index) = self.elements.iter().position(|e| e.handle() == handle) else {
            return Err(Error::InvalidHandle {
                handle: handle.to_string(),
            });
        };
        self.elements[index]
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(Error::WrongObjectType {
                handle: handle.to_string(),
                expected: short_type_name::<T>(),
            })
    }

    /// Removes the element owning `handle` and releases the handle.
    pub fn delete_object(&mut self, handle: &Handle<U>) -> Result<()> {
        if !self.handles.is_allocated(handle) {
            return Err(Error::InvalidHandle {
                handle: handle.to_string(),
            });
        }
        self.elements.retain(|element| element.handle() != handle);
        self.handles.deallocate(handle);
        tracing::debug!(handle = %handle, "deleted object");
        Ok(())
    }

    fn tag_of(element: &dyn GraphObject<U>) -> Option<TypeTag> {
        element.store().get::<ElementKind>().ok().map(|kind| kind.0)
    }

    /// Visits every element of one kind, in insertion order.
    pub fn for_each<T: GraphObject<U>>(&self, mut visit: impl FnMut(&T)) {
        let tag = type_tag::<T>();
        for element in &self.elements {
            if Self::tag_of(element.as_ref()) != Some(tag) {
                continue;
            }
            if let Some(typed) = element.as_any().downcast_ref::<T>() {
                visit(typed);
            }
        }
    }

    /// Visits every element whose kind tag is in `tags`, in insertion
    /// order.
    pub fn for_each_tagged(&self, tags: &[TypeTag], mut visit: impl FnMut(&dyn GraphObject<U>)) {
        for element in &self.elements {
            let Some(tag) = Self::tag_of(element.as_ref()) else {
                continue;
            };
            if tags.contains(&tag) {
                visit(element.as_ref());
            }
        }
    }

    /// Renders the whole diagram.
    ///
    /// Failing here leaves the graph untouched; a configuration error
    /// (missing kind, element/diagram mismatch) can be corrected and the
    /// render retried.
    pub fn render(&self) -> Result<String> {
        let Ok(kind) = self.props.get::<GraphKind>() else {
            return Err(Error::MissingGraphType);
        };
        let kind = kind.0;
        if !self.props.has::<Printable>() {
            return Ok(String::new());
        }
        tracing::trace!(%kind, elements = self.elements.len(), "rendering graph");

        let mut lines: Vec<String> = Vec::new();
        let mut header = self.props.render_property::<GraphKind>(kind);
        let direction = self.props.render_property::<FlowDirection>(kind);
        if !direction.is_empty() {
            header.push(' ');
            header.push_str(&direction);
        }
        lines.push(header);
        let numbering = self.props.render_property::<AutoNumber>(kind);
        if !numbering.is_empty() {
            lines.push(numbering);
        }

        let node_tags = [type_tag::<Node<U>>(), type_tag::<Span<U>>()];
        let trailer_tags = [
            type_tag::<Link<U>>(),
            type_tag::<Note<U>>(),
            type_tag::<ClassDef<U>>(),
        ];
        self.render_block(&node_tags, kind, &mut lines)?;
        self.render_block(&trailer_tags, kind, &mut lines)?;

        let mut body = lines.join("\n");
        body.push('\n');

        let format = self.props.get::<OutputFormat>().copied().unwrap_or_default();
        Ok(match format {
            OutputFormat::Markdown => format!("```mermaid\n{body}```\n"),
            OutputFormat::Mermaid => body,
        })
    }

    fn render_block(
        &self,
        tags: &[TypeTag],
        kind: DiagramType,
        lines: &mut Vec<String>,
    ) -> Result<()> {
        for element in &self.elements {
            let Some(tag) = Self::tag_of(element.as_ref()) else {
                continue;
            };
            if !tags.contains(&tag) {
                continue;
            }
            let text = element.render(kind)?;
            if !text.is_empty() {
                lines.push(text);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Source, Target};
    use crate::object::Name;

    #[test]
    fn new_graphs_are_flowcharts_wrapped_in_markdown() {
        let graph: Graph = Graph::new();
        assert_eq!(graph.render().unwrap(), "```mermaid\nflowchart TD\n```\n");
    }

    #[test]
    fn new_object_allocates_sequential_handles() {
        let mut graph: Graph = Graph::new();
        let first = graph.new_object::<Node<u32>>().handle().clone();
        let second = graph.new_object::<Node<u32>>().handle().clone();
        assert_eq!(*first.id(), 0);
        assert_eq!(*second.id(), 1);
        assert!(graph.handle_manager().is_allocated(&first));
    }

    #[test]
    fn new_object_at_rejects_a_used_handle() {
        let mut graph: Graph = Graph::new();
        let taken = graph.new_object::<Node<u32>>().handle().clone();
        let err = graph.new_object_at::<Node<u32>>(taken).unwrap_err();
        assert!(matches!(err, Error::HandleInUse { .. }));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn access_distinguishes_unknown_handles_from_wrong_kinds() {
        let mut graph: Graph = Graph::new();
        let node = graph.new_object::<Node<u32>>().handle().clone();
        let link = graph.new_object::<Link<u32>>().handle().clone();

        assert!(graph.access::<Node<u32>>(&node).is_ok());
        assert!(matches!(
            graph.access::<Node<u32>>(&link),
            Err(Error::WrongObjectType { expected: "Node", .. })
        ));
        assert!(matches!(
            graph.access::<Node<u32>>(&Handle::new(99)),
            Err(Error::InvalidHandle { .. })
        ));
    }

    #[test]
    fn delete_object_releases_the_handle_and_the_element() {
        let mut graph: Graph = Graph::new();
        let handle = graph.new_object::<Node<u32>>().handle().clone();
        graph.delete_object(&handle).unwrap();
        assert!(graph.is_empty());
        assert!(!graph.handle_manager().is_allocated(&handle));
        assert!(matches!(
            graph.delete_object(&handle),
            Err(Error::InvalidHandle { .. })
        ));
    }

    #[test]
    fn for_each_filters_by_kind_in_insertion_order() {
        let mut graph: Graph = Graph::new();
        graph.new_object::<Node<u32>>().set(Name::new("a")).unwrap();
        graph.new_object::<Link<u32>>();
        graph.new_object::<Node<u32>>().set(Name::new("b")).unwrap();

        let mut names = Vec::new();
        graph.for_each::<Node<u32>>(|node| {
            names.push(node.get::<Name>().unwrap().0.clone());
        });
        assert_eq!(names, ["a", "b"]);

        let mut tagged = 0;
        graph.for_each_tagged(
            &[type_tag::<Node<u32>>(), type_tag::<Link<u32>>()],
            |_| tagged += 1,
        );
        assert_eq!(tagged, 3);
    }

    #[test]
    fn rendering_without_a_kind_fails_until_it_is_set_again() {
        let mut graph: Graph = Graph::new();
        graph.remove::<GraphKind>();
        assert!(matches!(graph.render(), Err(Error::MissingGraphType)));

        graph.set(GraphKind(DiagramType::Flowchart)).unwrap();
        assert!(graph.render().is_ok());
    }

    #[test]
    fn an_unprintable_graph_renders_empty() {
        let mut graph: Graph = Graph::new();
        graph.remove::<Printable>();
        assert_eq!(graph.render().unwrap(), "");
    }

    #[test]
    fn muted_elements_leave_no_blank_lines() {
        let mut graph: Graph = Graph::new();
        graph.set(OutputFormat::Mermaid).unwrap();
        let a = graph.new_object::<Node<u32>>();
        a.set(Name::new("a")).unwrap();
        let quiet = graph.new_object::<Node<u32>>();
        quiet.set(Name::new("quiet")).unwrap();
        quiet.remove::<Printable>();

        assert_eq!(
            graph.render().unwrap(),
            "flowchart TD\n0@{ shape: rect, label: \"a\" }\n"
        );
    }

    #[test]
    fn graph_level_configuration_chains_like_any_object() {
        let mut graph: Graph = Graph::new();
        graph
            .set(GraphKind(DiagramType::Sequence))
            .unwrap()
            .set(AutoNumber(true))
            .unwrap()
            .set(OutputFormat::Mermaid)
            .unwrap();
        assert_eq!(graph.render().unwrap(), "sequenceDiagram\nautonumber\n");
    }

    #[test]
    fn a_gantt_graph_renders_spans_only() {
        let mut graph: Graph = Graph::new();
        graph
            .set(GraphKind(DiagramType::Gantt))
            .unwrap()
            .set(OutputFormat::Mermaid)
            .unwrap();
        let span = graph.new_object::<Span<u32>>();
        span.set(Name::new("Design")).unwrap();
        span.set(crate::elements::SpanWindow::lasting(
            "09:00".parse().unwrap(),
            "2h".parse().unwrap(),
        ))
        .unwrap();

        assert_eq!(graph.render().unwrap(), "gantt\nDesign: 0, 09:00, 11:00\n");
    }

    #[test]
    fn a_node_in_a_gantt_graph_is_a_render_error() {
        let mut graph: Graph = Graph::new();
        graph.set(GraphKind(DiagramType::Gantt)).unwrap();
        graph.new_object::<Node<u32>>().set(Name::new("x")).unwrap();
        assert!(matches!(
            graph.render(),
            Err(Error::UnsupportedDiagramType { .. })
        ));
    }

    #[test]
    fn links_hold_handles_not_objects() {
        let mut graph: Graph = Graph::new();
        let a = graph.new_object::<Node<u32>>();
        a.set(Name::new("a")).unwrap();
        let ha = a.handle().clone();
        let b = graph.new_object::<Node<u32>>();
        b.set(Name::new("b")).unwrap();
        let hb = b.handle().clone();
        graph
            .new_object::<Link<u32>>()
            .set(Source(ha.clone()))
            .unwrap()
            .set(Target(hb))
            .unwrap();

        // Deleting the source afterwards still renders the link line; the
        // handle is a plain identifier, not a reference.
        graph.delete_object(&ha).unwrap();
        graph.set(OutputFormat::Mermaid).unwrap();
        assert_eq!(
            graph.render().unwrap(),
            "flowchart TD\n1@{ shape: rect, label: \"b\" }\n0-->1\n"
        );
    }
}
