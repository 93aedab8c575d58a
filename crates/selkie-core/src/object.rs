//! The object abstraction shared by every diagram element (and by the
//! graph container itself): a property store behind a uniform typed API,
//! plus the polymorphic render operation.

use crate::diagram::DiagramType;
use crate::error::Result;
use crate::handle::{Handle, HandleDomain};
use crate::property::{Property, PropertyOf, PropertyStore};
use crate::tag::TypeTag;
use std::any::Any;

/// Anything carrying a property store.
///
/// The generic accessors are thin forwards to [`PropertyStore`]; `set` is
/// the chainable configuration entry point and the only operation that
/// enforces the property's declared owner at compile time.
pub trait PropertyHost {
    fn store(&self) -> &PropertyStore;

    fn store_mut(&mut self) -> &mut PropertyStore;

    fn has<P: Property>(&self) -> bool
    where
        Self: Sized,
    {
        self.store().has::<P>()
    }

    fn get<P: Property>(&self) -> Result<&P>
    where
        Self: Sized,
    {
        self.store().get::<P>()
    }

    fn get_mut<P: Property>(&mut self) -> Result<&mut P>
    where
        Self: Sized,
    {
        self.store_mut().get_mut::<P>()
    }

    fn create<P: Property>(&mut self) -> Result<()>
    where
        Self: Sized,
    {
        self.store_mut().create::<P>()
    }

    fn get_or_create<P: Property>(&mut self) -> Result<&mut P>
    where
        Self: Sized,
    {
        self.store_mut().get_or_create::<P>()
    }

    fn remove<P: Property>(&mut self)
    where
        Self: Sized,
    {
        self.store_mut().remove::<P>()
    }

    fn render_property<P: Property>(&self, diagram: DiagramType) -> String
    where
        Self: Sized,
    {
        self.store().render_property::<P>(diagram)
    }

    /// Sets a property value, creating the slot on demand.
    ///
    /// Fails when a declared parent property is missing. The
    /// `PropertyOf<Self>` bound rejects properties declared for other
    /// element kinds before the code compiles.
    fn set<P: PropertyOf<Self>>(&mut self, value: P) -> Result<&mut Self>
    where
        Self: Sized,
    {
        *self.store_mut().get_or_create::<P>()? = value;
        Ok(self)
    }
}

/// A diagram element owned by a graph.
///
/// Construction goes through the container ([`fresh`](Self::fresh) is
/// called with a freshly minted handle), identity is immutable afterwards,
/// and rendering is opt-in: without the [`Printable`] property an element
/// contributes empty text no matter what else is set.
pub trait GraphObject<U: HandleDomain>: PropertyHost + Any {
    /// Builds a blank element owned by the given handle.
    fn fresh(handle: Handle<U>) -> Self
    where
        Self: Sized;

    fn handle(&self) -> &Handle<U>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Full rendering entry point.
    fn render(&self, diagram: DiagramType) -> Result<String> {
        if !self.store().has::<Printable>() {
            return Ok(String::new());
        }
        self.render_body(diagram)
    }

    /// Kind-specific text. The default prints the element name when set,
    /// empty text otherwise.
    fn render_body(&self, diagram: DiagramType) -> Result<String> {
        let _ = diagram;
        Ok(self
            .store()
            .get::<Name>()
            .map(|name| name.0.clone())
            .unwrap_or_default())
    }
}

/// Display label of an element. Links render it as their inline text.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Property for Name {
    fn render(&self, _diagram: DiagramType) -> String {
        self.0.clone()
    }
}

impl<H: PropertyHost> PropertyOf<H> for Name {}

/// Opt-in marker: only elements carrying it produce render output.
/// Concrete element kinds set it at construction; removing it mutes an
/// element without deleting it.
#[derive(Default, Clone, Copy, Debug)]
pub struct Printable;

impl Property for Printable {}

impl<H: PropertyHost> PropertyOf<H> for Printable {}

/// Type tag the container stamps on every element it creates; the
/// discriminator behind type-filtered iteration and `access`.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementKind(pub TypeTag);

impl Property for ElementKind {}
