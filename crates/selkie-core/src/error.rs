use crate::diagram::DiagramType;
use crate::elements::span::DateTick;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("property {property} is not set on this object")]
    PropertyNotFound { property: &'static str },

    #[error("property {property} requires parent property {parent}")]
    MissingParentProperty {
        property: &'static str,
        parent: &'static str,
    },

    #[error("handle {handle} is not allocated in this graph")]
    InvalidHandle { handle: String },

    #[error("handle {handle} is already in use")]
    HandleInUse { handle: String },

    #[error("object at handle {handle} is not a {expected}")]
    WrongObjectType {
        handle: String,
        expected: &'static str,
    },

    #[error("graph type not set; set it before rendering")]
    MissingGraphType,

    #[error("{element} cannot be rendered in a {diagram} diagram")]
    UnsupportedDiagramType {
        element: &'static str,
        diagram: DiagramType,
    },

    #[error("invalid time of day {value:?}, expected HH:MM")]
    InvalidDateTick { value: String },

    #[error("invalid duration {value:?}, expected <hours>h<minutes>m")]
    InvalidDateDuration { value: String },

    #[error("span from {start} to {end} runs backwards")]
    DiscontinuousSpan { start: DateTick, end: DateTick },
}
