//! The property system: typed, optional slots attachable to any object.
//!
//! A property type is its own value. Each type may declare *parent*
//! properties (which must already be present before it can be created) and
//! *child* properties (removed together with it). Declarations are plain
//! data: [`PropertyLink`]s carry monomorphized presence/removal functions,
//! so cascade removal stays transitive without any run-time type lookup
//! beyond one integer comparison.

use crate::diagram::DiagramType;
use crate::error::{Error, Result};
use crate::tag::{TypeTag, short_type_name, type_tag};
use rustc_hash::FxHashMap;
use std::any::Any;
use std::fmt;

pub type PropertyId = TypeTag;

/// A named, typed, optional attribute of an object.
///
/// `render` produces the value's text form in a diagram context; types
/// that are meaningless under a given diagram type return empty text
/// there rather than failing. `render_unset` supplies the "what would
/// show" text for an absent slot (e.g. a link style defaults to a solid
/// arrow); most properties leave it at `None`.
pub trait Property: Default + Any {
    /// Properties that must exist on the object before this one.
    fn parents() -> Vec<PropertyLink>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Properties removed together with this one.
    fn children() -> Vec<PropertyLink>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Text form of a set value.
    fn render(&self, diagram: DiagramType) -> String {
        let _ = diagram;
        String::new()
    }

    /// Text form used while the property is absent; `None` renders empty.
    fn render_unset(diagram: DiagramType) -> Option<String>
    where
        Self: Sized,
    {
        let _ = diagram;
        None
    }
}

/// Compile-time link between a property type and the element kinds
/// allowed to carry it. Object-generic properties (name, printability)
/// carry a blanket impl; kind-specific ones (node shape, link style) name
/// their owner.
pub trait PropertyOf<Owner: ?Sized>: Property {}

/// One edge of the static property dependency graph.
#[derive(Clone, Copy)]
pub struct PropertyLink {
    name: &'static str,
    present: fn(&PropertyStore) -> bool,
    cascade: fn(&mut PropertyStore),
}

impl PropertyLink {
    pub fn to<P: Property>() -> Self {
        Self {
            name: short_type_name::<P>(),
            present: |store| store.has::<P>(),
            cascade: |store| store.remove::<P>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Per-object slot map: type-erased values keyed by property tag.
///
/// Insertion order is irrelevant here; ordering concerns live in the
/// graph's element sequence.
#[derive(Default)]
pub struct PropertyStore {
    slots: FxHashMap<PropertyId, Box<dyn Any>>,
}

impl PropertyStore {
    pub fn has<P: Property>(&self) -> bool {
        self.slots.contains_key(&type_tag::<P>())
    }

    pub fn get<P: Property>(&self) -> Result<&P> {
        self.slots
            .get(&type_tag::<P>())
            .and_then(|slot| slot.downcast_ref::<P>())
            .ok_or(Error::PropertyNotFound {
                property: short_type_name::<P>(),
            })
    }

    pub fn get_mut<P: Property>(&mut self) -> Result<&mut P> {
        self.slots
            .get_mut(&type_tag::<P>())
            .and_then(|slot| slot.downcast_mut::<P>())
            .ok_or(Error::PropertyNotFound {
                property: short_type_name::<P>(),
            })
    }

    /// Creates the slot with its default value if absent. The parent
    /// check runs on every call, matching removal's unconditional
    /// cascade.
    pub fn create<P: Property>(&mut self) -> Result<()> {
        for parent in P::parents() {
            if !(parent.present)(self) {
                return Err(Error::MissingParentProperty {
                    property: short_type_name::<P>(),
                    parent: parent.name,
                });
            }
        }
        self.slots
            .entry(type_tag::<P>())
            .or_insert_with(|| Box::new(P::default()));
        Ok(())
    }

    pub fn get_or_create<P: Property>(&mut self) -> Result<&mut P> {
        self.create::<P>()?;
        self.get_mut::<P>()
    }

    /// Removes the slot after cascading removal through every declared
    /// child, present or not. A dependent property never outlives its
    /// parent, even when it was set independently.
    pub fn remove<P: Property>(&mut self) {
        for child in P::children() {
            (child.cascade)(self);
        }
        self.slots.remove(&type_tag::<P>());
    }

    /// The generic stringify rule: a set value renders itself; an absent
    /// slot renders its unset default, or empty when there is none.
    pub fn render_property<P: Property>(&self, diagram: DiagramType) -> String {
        match self.get::<P>() {
            Ok(value) => value.render(diagram),
            Err(_) => P::render_unset(diagram).unwrap_or_default(),
        }
    }

    /// Container-internal direct insert, bypassing the parent check.
    pub(crate) fn insert<P: Property>(&mut self, value: P) {
        self.slots.insert(type_tag::<P>(), Box::new(value));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for PropertyStore {
    // Slot values are type-erased; only the shape is printable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyStore")
            .field("slots", &self.slots.len())
            .finish()
    }
}
