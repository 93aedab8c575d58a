//! Builds a numbered sequence diagram with an activation and a note,
//! using string handles so participants keep readable identifiers.

use selkie::{
    Activation, AutoNumber, Basis, DiagramType, Graph, GraphKind, Handle, Link, Name, Node, Note,
    NoteSide, OutputFormat, PropertyHost, Result, Side, Source, Target,
};

fn main() -> Result<()> {
    let mut graph: Graph<String> = Graph::new();
    graph
        .set(GraphKind(DiagramType::Sequence))?
        .set(AutoNumber(true))?
        .set(OutputFormat::Mermaid)?;

    for name in ["Client", "Server"] {
        graph
            .new_object_at::<Node<String>>(Handle::from(name))?
            .set(Name::new(name))?;
    }

    graph
        .new_object::<Link<String>>()
        .set(Source(Handle::from("Client")))?
        .set(Target(Handle::from("Server")))?
        .set(Name::new("Request"))?
        .set(Activation::Activate)?;

    let note = graph.new_object::<Note<String>>();
    note.set(Name::new("validates input"))?;
    note.get_or_create::<Basis<String>>()?
        .0
        .push(Handle::from("Server"));
    note.set(NoteSide::new(Side::Right))?;

    println!("{}", graph.render()?);
    Ok(())
}
