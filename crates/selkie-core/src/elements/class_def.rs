//! Flowchart style classes (`classDef` lines).

use crate::diagram::DiagramType;
use crate::error::{Error, Result};
use crate::handle::{Handle, HandleDomain};
use crate::object::{GraphObject, Name, Printable, PropertyHost};
use crate::property::{Property, PropertyOf, PropertyStore};
use crate::tag::short_type_name;
use std::any::Any;

/// Background color of the style class.
#[derive(Default, Clone, Debug)]
pub struct Fill(pub String);

impl Fill {
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }
}

impl Property for Fill {
    fn render(&self, _diagram: DiagramType) -> String {
        format!("fill:{},", self.0)
    }
}

impl<U: HandleDomain> PropertyOf<ClassDef<U>> for Fill {}

/// Border color of the style class.
#[derive(Default, Clone, Debug)]
pub struct Stroke(pub String);

impl Stroke {
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }
}

impl Property for Stroke {
    fn render(&self, _diagram: DiagramType) -> String {
        format!("stroke:{},", self.0)
    }
}

impl<U: HandleDomain> PropertyOf<ClassDef<U>> for Stroke {}

/// Text color of the style class.
#[derive(Default, Clone, Debug)]
pub struct Color(pub String);

impl Color {
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }
}

impl Property for Color {
    fn render(&self, _diagram: DiagramType) -> String {
        format!("color:{},", self.0)
    }
}

impl<U: HandleDomain> PropertyOf<ClassDef<U>> for Color {}

#[derive(Debug)]
pub struct ClassDef<U: HandleDomain> {
    handle: Handle<U>,
    props: PropertyStore,
}

impl<U: HandleDomain> PropertyHost for ClassDef<U> {
    fn store(&self) -> &PropertyStore {
        &self.props
    }

    fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.props
    }
}

impl<U: HandleDomain> GraphObject<U> for ClassDef<U> {
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
                let name = self.store().get::<Name>()?;
                let mut styles = String::new();
                styles.push_str(&self.store().render_property::<Fill>(diagram));
                styles.push_str(&self.store().render_property::<Stroke>(diagram));
                styles.push_str(&self.store().render_property::<Color>(diagram));
                let styles = styles.trim_end_matches(',');
                Ok(format!("classDef {}Class {}", name.0, styles)
                    .trim_end()
                    .to_string())
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

    fn class_def(name: &str) -> ClassDef<u32> {
        let mut def = ClassDef::fresh(Handle::new(4));
        def.set(Name::new(name)).unwrap();
        def
    }

    #[test]
    fn all_three_colors_join_with_commas() {
        let mut def = class_def("alert");
        def.set(Fill::new("#f96"))
            .unwrap()
            .set(Stroke::new("#333"))
            .unwrap()
            .set(Color::new("#fff"))
            .unwrap();
        assert_eq!(
            def.render(DiagramType::Flowchart).unwrap(),
            "classDef alertClass fill:#f96,stroke:#333,color:#fff"
        );
    }

    #[test]
    fn a_partial_style_set_drops_the_trailing_comma() {
        let mut def = class_def("calm");
        def.set(Fill::new("#9cf")).unwrap();
        assert_eq!(
            def.render(DiagramType::Flowchart).unwrap(),
            "classDef calmClass fill:#9cf"
        );
    }

    #[test]
    fn a_style_class_needs_a_name() {
        let bare: ClassDef<u32> = ClassDef::fresh(Handle::new(4));
        assert!(matches!(
            bare.render(DiagramType::Flowchart),
            Err(Error::PropertyNotFound { property: "Name" })
        ));
    }

    #[test]
    fn class_definitions_are_flowchart_only() {
        let err = class_def("alert").render(DiagramType::Sequence).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedDiagramType { element: "ClassDef", .. }
        ));
    }
}
