//! Sequence-diagram notes, anchored over one or more participants.

use crate::diagram::DiagramType;
use crate::error::{Error, Result};
use crate::handle::{Handle, HandleDomain};
use crate::object::{GraphObject, Name, Printable, PropertyHost};
use crate::property::{Property, PropertyLink, PropertyOf, PropertyStore};
use crate::tag::short_type_name;
use std::any::Any;
use std::marker::PhantomData;

/// Which side of a single anchor a note sits on.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    #[default]
    Left,
    Right,
}

/// Handles the note is anchored to. One anchor renders as
/// `Note <side> of …`, several as `Note over …`.
#[derive(Clone, Debug)]
pub struct Basis<U: HandleDomain>(pub Vec<Handle<U>>);

impl<U: HandleDomain> Default for Basis<U> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<U: HandleDomain> Property for Basis<U> {
    fn children() -> Vec<PropertyLink> {
        vec![PropertyLink::to::<NoteSide<U>>()]
    }

    fn render(&self, diagram: DiagramType) -> String {
        match diagram {
            DiagramType::Sequence => self
                .0
                .iter()
                .map(|handle| handle.render(diagram))
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        }
    }
}

impl<U: HandleDomain> PropertyOf<Note<U>> for Basis<U> {}

/// Anchor side of a single-basis note. Meaningless without a [`Basis`],
/// so it is declared as its dependent: creating it first fails, and
/// removing the basis removes it too.
#[derive(Clone, Debug)]
pub struct NoteSide<U: HandleDomain>(pub Side, PhantomData<U>);

impl<U: HandleDomain> NoteSide<U> {
    pub fn new(side: Side) -> Self {
        Self(side, PhantomData)
    }
}

impl<U: HandleDomain> Default for NoteSide<U> {
    fn default() -> Self {
        Self::new(Side::default())
    }
}

impl<U: HandleDomain> Property for NoteSide<U> {
    fn parents() -> Vec<PropertyLink> {
        vec![PropertyLink::to::<Basis<U>>()]
    }

    fn render(&self, diagram: DiagramType) -> String {
        match diagram {
            DiagramType::Sequence => match self.0 {
                Side::Left => "left",
                Side::Right => "right",
            }
            .to_string(),
            _ => String::new(),
        }
    }

    fn render_unset(diagram: DiagramType) -> Option<String> {
        Some(NoteSide::<U>::default().render(diagram))
    }
}

impl<U: HandleDomain> PropertyOf<Note<U>> for NoteSide<U> {}

#[derive(Debug)]
pub struct Note<U: HandleDomain> {
    handle: Handle<U>,
    props: PropertyStore,
}

impl<U: HandleDomain> PropertyHost for Note<U> {
    fn store(&self) -> &PropertyStore {
        &self.props
    }

    fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.props
    }
}

impl<U: HandleDomain> GraphObject<U> for Note<U> {
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
            DiagramType::Sequence => {
                // A note without anchors has nothing to say.
                let Ok(basis) = self.store().get::<Basis<U>>() else {
                    return Ok(String::new());
                };
                let text = self.store().render_property::<Name>(diagram);
                if basis.0.len() == 1 {
                    Ok(format!(
                        "Note {} of {} : {}",
                        self.store().render_property::<NoteSide<U>>(diagram),
                        self.store().render_property::<Basis<U>>(diagram),
                        text,
                    ))
                } else {
                    Ok(format!(
                        "Note over {} : {}",
                        self.store().render_property::<Basis<U>>(diagram),
                        text,
                    ))
                }
            }
            _ => Err(Error::UnsupportedDiagramType {
                element: short_type_name::<Self>(),
                diagram,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(anchors: &[u32]) -> Note<u32> {
        let mut note = Note::fresh(Handle::new(5));
        note.set(Name::new("careful")).unwrap();
        note.get_or_create::<Basis<u32>>()
            .unwrap()
            .0
            .extend(anchors.iter().map(|&id| Handle::new(id)));
        note
    }

    #[test]
    fn a_single_anchor_defaults_to_the_left_side() {
        assert_eq!(
            note(&[0]).render(DiagramType::Sequence).unwrap(),
            "Note left of OBJ0 : careful"
        );
    }

    #[test]
    fn the_side_can_be_chosen_once_a_basis_exists() {
        let mut note = note(&[0]);
        note.set(NoteSide::new(Side::Right)).unwrap();
        assert_eq!(
            note.render(DiagramType::Sequence).unwrap(),
            "Note right of OBJ0 : careful"
        );
    }

    #[test]
    fn several_anchors_render_as_note_over() {
        assert_eq!(
            note(&[0, 2]).render(DiagramType::Sequence).unwrap(),
            "Note over OBJ0, OBJ2 : careful"
        );
    }

    #[test]
    fn a_side_without_a_basis_is_rejected() {
        let mut bare: Note<u32> = Note::fresh(Handle::new(5));
        let err = bare.set(NoteSide::new(Side::Right)).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParentProperty {
                property: "NoteSide",
                parent: "Basis",
            }
        ));
    }

    #[test]
    fn removing_the_basis_takes_the_side_with_it() {
        let mut note = note(&[0]);
        note.set(NoteSide::new(Side::Right)).unwrap();
        note.remove::<Basis<u32>>();
        assert!(!note.has::<NoteSide<u32>>());
        assert!(!note.has::<Basis<u32>>());
    }

    #[test]
    fn an_anchorless_note_renders_empty() {
        let mut note: Note<u32> = Note::fresh(Handle::new(5));
        note.set(Name::new("floating")).unwrap();
        assert_eq!(note.render(DiagramType::Sequence).unwrap(), "");
    }

    #[test]
    fn notes_are_sequence_only() {
        let err = note(&[0]).render(DiagramType::Flowchart).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedDiagramType { element: "Note", .. }
        ));
    }
}
