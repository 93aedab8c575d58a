//! Builds a Gantt chart from chained time windows.

use selkie::{
    DiagramType, Graph, GraphKind, Name, OutputFormat, PropertyHost, Result, Span, SpanWindow,
};

fn main() -> Result<()> {
    let mut graph: Graph = Graph::new();
    graph
        .set(GraphKind(DiagramType::Gantt))?
        .set(OutputFormat::Mermaid)?;

    let design = SpanWindow::lasting("09:00".parse()?, "1h30m".parse()?);
    let review = SpanWindow::after(&design, "45m".parse()?);
    let polish = SpanWindow::until(&review, "13:00".parse()?)?;

    for (name, window) in [("Design", design), ("Review", review), ("Polish", polish)] {
        graph
            .new_object::<Span<u32>>()
            .set(Name::new(name))?
            .set(window)?;
    }

    println!("{}", graph.render()?);
    Ok(())
}
