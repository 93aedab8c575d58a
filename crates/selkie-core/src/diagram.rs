use std::fmt;

/// Target output grammar, supplied as context to every render call.
///
/// The diagram type is not stored on individual elements: the same graph
/// can be asked to render under different types, and only the textual
/// form changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DiagramType {
    #[default]
    Flowchart,
    Sequence,
    Gantt,
}

impl DiagramType {
    /// Header keyword opening a diagram of this type.
    pub fn keyword(self) -> &'static str {
        match self {
            DiagramType::Flowchart => "flowchart",
            DiagramType::Sequence => "sequenceDiagram",
            DiagramType::Gantt => "gantt",
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
