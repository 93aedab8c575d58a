//! Builds a small flowchart with a subgraph and two styled links, then
//! prints the markdown-wrapped Mermaid source.

use selkie::{
    ClassDef, Fill, FlowDirection, Graph, GraphObject, LineStyle, Link, LinkStyle, Name, Node,
    PropertyHost, Result, Shape, Source, Stroke, SubgraphMembers, Target,
};

fn main() -> Result<()> {
    let mut graph: Graph = Graph::new();
    graph.set(FlowDirection::LeftRight)?;

    let john = graph.new_object::<Node<u32>>();
    john.set(Name::new("John Doe"))?.set(Shape::Rectangle)?;
    let john = john.handle().clone();

    let jane = graph.new_object::<Node<u32>>();
    jane.set(Name::new("Jane Doe"))?.set(Shape::Diamond)?;
    let jane = jane.handle().clone();

    let group = graph.new_object::<Node<u32>>();
    group.set(Name::new("Does"))?;
    group
        .get_or_create::<SubgraphMembers<u32>>()?
        .0
        .extend([john.clone(), jane.clone()]);

    graph
        .new_object::<Link<u32>>()
        .set(Source(john.clone()))?
        .set(Target(jane.clone()))?
        .set(LinkStyle::new(LineStyle::Dashed, true))?;

    graph
        .new_object::<Link<u32>>()
        .set(Source(jane))?
        .set(Target(john))?
        .set(Name::new("Link 2"))?;

    graph
        .new_object::<ClassDef<u32>>()
        .set(Name::new("Person"))?
        .set(Fill::new("#f9f"))?
        .set(Stroke::new("#333"))?;

    println!("{}", graph.render()?);
    Ok(())
}
