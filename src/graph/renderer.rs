use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use miette::Result;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::core::{ComponentId, EdgeOrigin, ExclusionCause, ExclusionEvent};
use crate::error::WiringGuardError;
use crate::graph::DependencyGraph;

// Blue-Orange Accessible Palette
mod colors {
    pub const LIVE_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const LIVE_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const EXCLUDED_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const EXCLUDED_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const STATIC_EDGE: &str = "#64B5F6"; // Soft blue
    pub const INSTANCE_EDGE: &str = "#90A4AE"; // Blue-grey
    pub const EXCLUDED_EDGE: &str = "#FF6500"; // Deep orange
    pub const LEGEND_BG: &str = "#FAFAFA"; // Off-white background
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(WiringGuardError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(WiringGuardError::from)
    };
}

/// Output format for [`GraphRenderer::render`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderFormat {
    Dot,
    Mermaid,
}

/// A component as drawn: its identity and, if it left the live set, why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderNode {
    pub id: ComponentId,
    pub exclusion: Option<ExclusionCause>,
}

impl RenderNode {
    pub fn is_excluded(&self) -> bool {
        self.exclusion.is_some()
    }
}

pub struct GraphRenderer {
    highlight_exclusions: bool,
}

impl GraphRenderer {
    pub fn new(highlight_exclusions: bool) -> Self {
        Self {
            highlight_exclusions,
        }
    }

    /// Build a drawable snapshot of `graph`
    ///
    /// Nodes are added in key order and edges in `(from, to)` order. Keys
    /// that are only referenced by an edge still get a node. Components named
    /// in `exclusions` are tagged with their cause; exclusions for components
    /// the graph never saw are left out.
    pub fn snapshot(
        graph: &DependencyGraph,
        exclusions: &[ExclusionEvent],
    ) -> DiGraph<RenderNode, EdgeOrigin> {
        let causes: HashMap<&ComponentId, ExclusionCause> = exclusions
            .iter()
            .map(|event| (&event.component, event.cause))
            .collect();
        let edges = graph.edges();

        let mut keys: Vec<ComponentId> = graph.all_nodes().collect();
        keys.extend(
            edges
                .iter()
                .flat_map(|(from, to, _)| [from, to])
                .filter(|key| !graph.contains(key))
                .cloned(),
        );
        keys.sort();
        keys.dedup();

        let mut snapshot = DiGraph::with_capacity(keys.len(), edges.len());
        let mut indices: BTreeMap<ComponentId, NodeIndex> = BTreeMap::new();
        for key in keys {
            let index = snapshot.add_node(RenderNode {
                exclusion: causes.get(&key).copied(),
                id: key.clone(),
            });
            indices.insert(key, index);
        }

        for (from, to, origin) in edges {
            if let (Some(&source), Some(&target)) = (indices.get(&from), indices.get(&to)) {
                snapshot.add_edge(source, target, origin);
            }
        }

        snapshot
    }

    pub fn render(
        &self,
        format: RenderFormat,
        graph: &DependencyGraph,
        exclusions: &[ExclusionEvent],
        output: &mut dyn Write,
    ) -> Result<()> {
        let snapshot = Self::snapshot(graph, exclusions);
        match format {
            RenderFormat::Dot => self.render_dot(&snapshot, output),
            RenderFormat::Mermaid => self.render_mermaid(&snapshot, output),
        }
    }

    pub fn render_dot(
        &self,
        graph: &DiGraph<RenderNode, EdgeOrigin>,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph component_dependencies {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        for index in graph.node_indices() {
            let node = &graph[index];
            let highlighted = self.is_highlighted(node);

            let (fill_color, stroke_color, penwidth) = if highlighted {
                (colors::EXCLUDED_NODE_FILL, colors::EXCLUDED_NODE_STROKE, 3)
            } else {
                (colors::LIVE_NODE_FILL, colors::LIVE_NODE_STROKE, 2)
            };

            let name = dot_escape(node.id.as_str());
            let label = match node.exclusion {
                Some(cause) if highlighted => format!("{name}\\n({})", cause.tag()),
                _ => name.clone(),
            };

            writeln_out!(
                output,
                r#"    "{}" [label="{}", style="rounded,filled", fillcolor="{}", color="{}", penwidth={}];"#,
                name,
                label,
                fill_color,
                stroke_color,
                penwidth
            )?;
        }

        if graph.edge_count() > 0 {
            writeln_out!(output)?;
        }

        for edge in graph.edge_references() {
            let source = &graph[edge.source()];
            let target = &graph[edge.target()];
            let origin = *edge.weight();

            let (color, penwidth) =
                if self.is_highlighted(source) || self.is_highlighted(target) {
                    (colors::EXCLUDED_EDGE, 3)
                } else {
                    (edge_color(origin), 2)
                };
            let style = match origin {
                EdgeOrigin::Static => "solid",
                EdgeOrigin::Instance => "dashed",
            };

            writeln_out!(
                output,
                r#"    "{}" -> "{}" [style={}, color="{}", penwidth={}];"#,
                dot_escape(source.id.as_str()),
                dot_escape(target.id.as_str()),
                style,
                color,
                penwidth
            )?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    pub fn render_mermaid(
        &self,
        graph: &DiGraph<RenderNode, EdgeOrigin>,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "graph LR")?;

        for index in graph.node_indices() {
            let node = &graph[index];
            let node_id = mermaid_id(node.id.as_str());
            let name = mermaid_escape(node.id.as_str());

            if self.is_highlighted(node) {
                let tag = node.exclusion.map(|cause| cause.tag()).unwrap_or_default();
                writeln_out!(output, "    {}((\"{}<br/>{}\"))", node_id, name, tag)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:3px",
                    node_id,
                    colors::EXCLUDED_NODE_FILL,
                    colors::EXCLUDED_NODE_STROKE
                )?;
            } else {
                writeln_out!(output, "    {}[\"{}\"]", node_id, name)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:2px",
                    node_id,
                    colors::LIVE_NODE_FILL,
                    colors::LIVE_NODE_STROKE
                )?;
            }
        }

        if graph.edge_count() > 0 {
            writeln_out!(output)?;
        }

        // linkStyle indices follow the order links are declared in
        for (link_index, edge) in graph.edge_references().enumerate() {
            let source = &graph[edge.source()];
            let target = &graph[edge.target()];
            let origin = *edge.weight();

            let arrow = match origin {
                EdgeOrigin::Static => "-->",
                EdgeOrigin::Instance => "-.->",
            };
            writeln_out!(
                output,
                "    {} {} {}",
                mermaid_id(source.id.as_str()),
                arrow,
                mermaid_id(target.id.as_str())
            )?;

            let (color, width) = if self.is_highlighted(source) || self.is_highlighted(target) {
                (colors::EXCLUDED_EDGE, 3)
            } else {
                (edge_color(origin), 2)
            };
            writeln_out!(
                output,
                "    linkStyle {} stroke:{},stroke-width:{}px",
                link_index,
                color,
                width
            )?;
        }

        let has_exclusions = graph.node_weights().any(RenderNode::is_excluded);
        if has_exclusions && self.highlight_exclusions {
            writeln_out!(output)?;
            writeln_out!(output, "    subgraph Legend")?;
            writeln_out!(output, "        L1[Live component]")?;
            writeln_out!(output, "        L2((Excluded component))")?;
            writeln_out!(
                output,
                "        style L1 fill:{},stroke:{},stroke-width:2px",
                colors::LIVE_NODE_FILL,
                colors::LIVE_NODE_STROKE
            )?;
            writeln_out!(
                output,
                "        style L2 fill:{},stroke:{},stroke-width:3px",
                colors::EXCLUDED_NODE_FILL,
                colors::EXCLUDED_NODE_STROKE
            )?;
            writeln_out!(
                output,
                "        style Legend fill:{},stroke:#ddd,stroke-width:1px",
                colors::LEGEND_BG
            )?;
            writeln_out!(output, "    end")?;
        }

        Ok(())
    }

    fn is_highlighted(&self, node: &RenderNode) -> bool {
        self.highlight_exclusions && node.is_excluded()
    }
}

fn edge_color(origin: EdgeOrigin) -> &'static str {
    match origin {
        EdgeOrigin::Static => colors::STATIC_EDGE,
        EdgeOrigin::Instance => colors::INSTANCE_EDGE,
    }
}

fn dot_escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

// Mermaid node ids must be plain identifiers
fn mermaid_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

fn mermaid_escape(name: &str) -> String {
    name.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, cause: ExclusionCause) -> ExclusionEvent {
        ExclusionEvent::new(ComponentId::from(id), cause)
    }

    #[test]
    fn test_snapshot_is_sorted_and_tagged() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("web", "cache", EdgeOrigin::Static);
        graph.add_edge("cache", "web", EdgeOrigin::Instance);
        graph.register("api");

        let snapshot = GraphRenderer::snapshot(
            &graph,
            &[
                event("cache", ExclusionCause::CycleMember),
                event("never-seen", ExclusionCause::Manual),
            ],
        );

        let names: Vec<&str> = snapshot.node_weights().map(|n| n.id.as_str()).collect();
        assert_eq!(names, vec!["api", "cache", "web"]);
        assert_eq!(snapshot.edge_count(), 2);

        let cache = snapshot
            .node_weights()
            .find(|n| n.id.as_str() == "cache")
            .unwrap();
        assert_eq!(cache.exclusion, Some(ExclusionCause::CycleMember));
    }

    #[test]
    fn test_snapshot_keeps_dangling_keys() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("web", "orders", EdgeOrigin::Static);
        graph.remove(&ComponentId::from("orders"));

        let snapshot =
            GraphRenderer::snapshot(&graph, &[event("orders", ExclusionCause::Unrooted)]);

        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.edge_count(), 1);
        assert!(snapshot.node_weights().any(RenderNode::is_excluded));
    }

    #[test]
    fn test_dot_escapes_quotes() {
        assert_eq!(dot_escape(r#"a"b"#), r#"a\"b"#);
        assert_eq!(mermaid_id("com.acme.Web"), "com_acme_Web");
    }
}
