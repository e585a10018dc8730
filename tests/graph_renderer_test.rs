//! Tests for the graph renderer module

use std::io::Cursor;

use wiring_guard::core::{ComponentId, EdgeOrigin, ExclusionCause, ExclusionEvent};
use wiring_guard::graph::{DependencyGraph, GraphRenderer, RenderFormat};

/// A web tier with a static dependency on orders and an injection cycle
/// between orders and billing
fn create_test_graph() -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    graph.add_edge("web", "orders", EdgeOrigin::Static);
    graph.add_edge("orders", "billing", EdgeOrigin::Instance);
    graph.add_edge("billing", "orders", EdgeOrigin::Instance);
    graph.register("audit");
    graph
}

fn cycle_exclusions() -> Vec<ExclusionEvent> {
    ["billing", "orders"]
        .into_iter()
        .map(|id| ExclusionEvent::new(ComponentId::from(id), ExclusionCause::CycleMember))
        .collect()
}

fn render(
    renderer: &GraphRenderer,
    format: RenderFormat,
    graph: &DependencyGraph,
    exclusions: &[ExclusionEvent],
) -> String {
    let mut output = Cursor::new(Vec::new());
    renderer
        .render(format, graph, exclusions, &mut output)
        .unwrap();
    String::from_utf8(output.into_inner()).unwrap()
}

#[test]
fn test_dot_output_without_exclusions() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("web", "orders", EdgeOrigin::Static);
    graph.add_edge("orders", "billing", EdgeOrigin::Instance);

    let output = render(&GraphRenderer::new(true), RenderFormat::Dot, &graph, &[]);

    assert!(output.starts_with("digraph component_dependencies {"));
    assert!(output.trim_end().ends_with('}'));
    assert!(output.contains(r##""web" -> "orders" [style=solid, color="#64B5F6", penwidth=2];"##));
    assert!(
        output.contains(r##""orders" -> "billing" [style=dashed, color="#90A4AE", penwidth=2];"##)
    );
    assert!(!output.contains("#FF6500"));
    assert!(!output.contains("(cycle)"));
}

#[test]
fn test_dot_highlights_excluded_components() {
    let output = render(
        &GraphRenderer::new(true),
        RenderFormat::Dot,
        &create_test_graph(),
        &cycle_exclusions(),
    );

    assert!(output.contains(r#"label="orders\n(cycle)""#));
    assert!(output.contains(r#"label="billing\n(cycle)""#));
    assert!(output.contains(r#""audit" [label="audit""#));

    // Any edge touching an excluded component is drawn in the exclusion color
    assert!(output.contains(r##""web" -> "orders" [style=solid, color="#FF6500", penwidth=3];"##));
    assert!(
        output.contains(r##""billing" -> "orders" [style=dashed, color="#FF6500", penwidth=3];"##)
    );
}

#[test]
fn test_dot_without_highlighting() {
    let output = render(
        &GraphRenderer::new(false),
        RenderFormat::Dot,
        &create_test_graph(),
        &cycle_exclusions(),
    );

    assert!(!output.contains("(cycle)"));
    assert!(!output.contains("#FF6500"));
    assert!(output.contains(r#""orders" [label="orders""#));
}

#[test]
fn test_dot_node_order_is_stable() {
    let output = render(
        &GraphRenderer::new(true),
        RenderFormat::Dot,
        &create_test_graph(),
        &[],
    );

    let node_lines: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("[label="))
        .collect();
    assert_eq!(node_lines.len(), 4);
    assert!(node_lines[0].contains(r#""audit""#));
    assert!(node_lines[1].contains(r#""billing""#));
    assert!(node_lines[2].contains(r#""orders""#));
    assert!(node_lines[3].contains(r#""web""#));
}

#[test]
fn test_mermaid_output_with_legend() {
    let output = render(
        &GraphRenderer::new(true),
        RenderFormat::Mermaid,
        &create_test_graph(),
        &cycle_exclusions(),
    );

    assert!(output.starts_with("graph LR"));
    assert!(output.contains(r#"web["web"]"#));
    assert!(output.contains(r#"orders(("orders<br/>cycle"))"#));
    assert!(output.contains("web --> orders"));
    assert!(output.contains("orders -.-> billing"));
    assert!(output.contains("billing -.-> orders"));
    assert!(output.contains("subgraph Legend"));

    // One linkStyle per declared link
    let link_styles = output.matches("linkStyle").count();
    assert_eq!(link_styles, 3);
}

#[test]
fn test_mermaid_without_highlighting_has_no_legend() {
    let output = render(
        &GraphRenderer::new(false),
        RenderFormat::Mermaid,
        &create_test_graph(),
        &cycle_exclusions(),
    );

    assert!(output.contains(r#"orders["orders"]"#));
    assert!(!output.contains("<br/>"));
    assert!(!output.contains("subgraph Legend"));
}

#[test]
fn test_special_characters_in_names() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("com.acme.Web", r#"com.acme."Quoted""#, EdgeOrigin::Static);

    let dot = render(&GraphRenderer::new(true), RenderFormat::Dot, &graph, &[]);
    assert!(dot.contains(r#""com.acme.\"Quoted\"""#));

    let mermaid = render(&GraphRenderer::new(true), RenderFormat::Mermaid, &graph, &[]);
    assert!(mermaid.contains("com_acme_Web --> com_acme__Quoted_"));
    assert!(mermaid.contains("#quot;Quoted#quot;"));
}

#[test]
fn test_empty_graph() {
    let graph = DependencyGraph::new();

    let dot = render(&GraphRenderer::new(true), RenderFormat::Dot, &graph, &[]);
    assert!(dot.starts_with("digraph component_dependencies {"));
    assert!(!dot.contains("->"));

    let mermaid = render(&GraphRenderer::new(true), RenderFormat::Mermaid, &graph, &[]);
    assert_eq!(mermaid.trim(), "graph LR");
}

#[test]
fn test_evicted_component_is_still_drawn() {
    let mut graph = create_test_graph();
    for event in cycle_exclusions() {
        graph.remove(&event.component);
    }

    let output = render(
        &GraphRenderer::new(true),
        RenderFormat::Dot,
        &graph,
        &cycle_exclusions(),
    );

    // The dangling web -> orders key keeps orders on the drawing
    assert!(output.contains(r#"label="orders\n(cycle)""#));
    assert!(output.contains(r#""web" -> "orders""#));
}
