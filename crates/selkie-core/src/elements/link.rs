//! Links: flowchart arrows and sequence messages.

use crate::diagram::DiagramType;
use crate::error::{Error, Result};
use crate::handle::{Handle, HandleDomain};
use crate::object::{GraphObject, Name, Printable, PropertyHost};
use crate::property::{Property, PropertyOf, PropertyStore};
use crate::tag::short_type_name;
use std::any::Any;

/// Line pattern of a flowchart connector.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Bold,
}

impl LineStyle {
    /// Glyph on the source side of an inline label.
    fn open(self) -> &'static str {
        match self {
            LineStyle::Solid => "--",
            LineStyle::Dashed => "-.",
            LineStyle::Bold => "==",
        }
    }

    /// Glyph on the target side of an inline label (the opening glyph
    /// mirrored).
    fn close(self) -> &'static str {
        match self {
            LineStyle::Solid => "--",
            LineStyle::Dashed => ".-",
            LineStyle::Bold => "==",
        }
    }

    /// Full connector for an unlabeled link.
    fn connector(self) -> &'static str {
        match self {
            LineStyle::Solid => "--",
            LineStyle::Dashed => "-.-",
            LineStyle::Bold => "==",
        }
    }
}

/// Flowchart connector style: line pattern plus optional arrowhead.
/// The unset default is a solid arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkStyle {
    pub line: LineStyle,
    pub arrowhead: bool,
}

impl LinkStyle {
    pub fn new(line: LineStyle, arrowhead: bool) -> Self {
        Self { line, arrowhead }
    }

    fn head(self) -> &'static str {
        if self.arrowhead { ">" } else { "" }
    }
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            line: LineStyle::Solid,
            arrowhead: true,
        }
    }
}

impl Property for LinkStyle {
    fn render(&self, diagram: DiagramType) -> String {
        match diagram {
            DiagramType::Flowchart => format!("{}{}", self.line.connector(), self.head()),
            _ => String::new(),
        }
    }

    fn render_unset(diagram: DiagramType) -> Option<String> {
        Some(LinkStyle::default().render(diagram))
    }
}

impl<U: HandleDomain> PropertyOf<Link<U>> for LinkStyle {}

/// Handle of the element this link leaves.
#[derive(Clone, Debug)]
pub struct Source<U: HandleDomain>(pub Handle<U>);

impl<U: HandleDomain> Default for Source<U> {
    fn default() -> Self {
        Self(Handle::default())
    }
}

impl<U: HandleDomain> Property for Source<U> {}

impl<U: HandleDomain> PropertyOf<Link<U>> for Source<U> {}

/// Handle of the element this link enters.
#[derive(Clone, Debug)]
pub struct Target<U: HandleDomain>(pub Handle<U>);

impl<U: HandleDomain> Default for Target<U> {
    fn default() -> Self {
        Self(Handle::default())
    }
}

impl<U: HandleDomain> Property for Target<U> {}

impl<U: HandleDomain> PropertyOf<Link<U>> for Target<U> {}

/// Sequence-diagram liveness marker, emitted between the arrow and the
/// target participant.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    #[default]
    Activate,
    Deactivate,
}

impl Property for Activation {
    fn render(&self, diagram: DiagramType) -> String {
        match diagram {
            DiagramType::Sequence => match self {
                Activation::Activate => "+",
                Activation::Deactivate => "-",
            }
            .to_string(),
            _ => String::new(),
        }
    }
}

impl<U: HandleDomain> PropertyOf<Link<U>> for Activation {}

#[derive(Debug)]
pub struct Link<U: HandleDomain> {
    handle: Handle<U>,
    props: PropertyStore,
}

impl<U: HandleDomain> PropertyHost for Link<U> {
    fn store(&self) -> &PropertyStore {
        &self.props
    }

    fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.props
    }
}

impl<U: HandleDomain> GraphObject<U> for Link<U> {
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
        let source = &self.store().get::<Source<U>>()?.0;
        let target = &self.store().get::<Target<U>>()?.0;
        match diagram {
            DiagramType::Flowchart => {
                let label = self.store().render_property::<Name>(diagram);
                let arrow = if label.is_empty() {
                    self.store().render_property::<LinkStyle>(diagram)
                } else {
                    let style = self.store().get::<LinkStyle>().copied().unwrap_or_default();
                    format!(
                        "{}\"{}\"{}{}",
                        style.line.open(),
                        label,
                        style.line.close(),
                        style.head(),
                    )
                };
                Ok(format!(
                    "{}{}{}",
                    source.render(diagram),
                    arrow,
                    target.render(diagram),
                ))
            }
            DiagramType::Sequence => {
                let line = format!(
                    "{}->>{}{}: {}",
                    source.render(diagram),
                    self.store().render_property::<Activation>(diagram),
                    target.render(diagram),
                    self.store().render_property::<Name>(diagram),
                );
                Ok(line.trim_end().to_string())
            }
            DiagramType::Gantt => Err(Error::UnsupportedDiagramType {
                element: short_type_name::<Self>(),
                diagram,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> Link<u32> {
        let mut link = Link::fresh(Handle::new(9));
        link.set(Source(Handle::new(0)))
            .unwrap()
            .set(Target(Handle::new(1)))
            .unwrap();
        link
    }

    #[test]
    fn the_default_flowchart_arrow_is_solid_with_a_head() {
        assert_eq!(link().render(DiagramType::Flowchart).unwrap(), "0-->1");
    }

    #[test]
    fn dashed_and_bold_connectors() {
        let mut dashed = link();
        dashed.set(LinkStyle::new(LineStyle::Dashed, true)).unwrap();
        assert_eq!(dashed.render(DiagramType::Flowchart).unwrap(), "0-.->1");

        let mut bold = link();
        bold.set(LinkStyle::new(LineStyle::Bold, false)).unwrap();
        assert_eq!(bold.render(DiagramType::Flowchart).unwrap(), "0==1");
    }

    #[test]
    fn labels_are_spliced_into_the_connector() {
        let mut labeled = link();
        labeled.set(Name::new("yes")).unwrap();
        assert_eq!(
            labeled.render(DiagramType::Flowchart).unwrap(),
            "0--\"yes\"-->1"
        );

        labeled.set(LinkStyle::new(LineStyle::Dashed, true)).unwrap();
        assert_eq!(
            labeled.render(DiagramType::Flowchart).unwrap(),
            "0-.\"yes\".->1"
        );
    }

    #[test]
    fn sequence_messages_use_the_async_arrow() {
        let mut message = link();
        message.set(Name::new("Request")).unwrap();
        assert_eq!(
            message.render(DiagramType::Sequence).unwrap(),
            "OBJ0->>OBJ1: Request"
        );
    }

    #[test]
    fn activation_markers_sit_between_arrow_and_target() {
        let mut message = link();
        message
            .set(Name::new("go"))
            .unwrap()
            .set(Activation::Activate)
            .unwrap();
        assert_eq!(
            message.render(DiagramType::Sequence).unwrap(),
            "OBJ0->>+OBJ1: go"
        );

        message.set(Activation::Deactivate).unwrap();
        assert_eq!(
            message.render(DiagramType::Sequence).unwrap(),
            "OBJ0->>-OBJ1: go"
        );
    }

    #[test]
    fn an_unlabeled_sequence_message_has_no_trailing_space() {
        assert_eq!(link().render(DiagramType::Sequence).unwrap(), "OBJ0->>OBJ1:");
    }

    #[test]
    fn links_without_endpoints_fail() {
        let bare: Link<u32> = Link::fresh(Handle::new(9));
        assert!(matches!(
            bare.render(DiagramType::Flowchart),
            Err(Error::PropertyNotFound { property: "Source" })
        ));
    }

    #[test]
    fn links_are_not_gantt_elements() {
        let err = link().render(DiagramType::Gantt).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedDiagramType { element: "Link", .. }
        ));
    }
}
