//! SVG drawing of the interaction graph.

use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::graph::InteractionGraph;

/// Categorical colours, cycled by community id.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Fill used for nodes missing from the partition.
const UNASSIGNED: &str = "#87ceeb";

const MARGIN: f64 = 40.0;
const NODE_RADIUS: f64 = 4.0;

/// Escape text for use inside SVG elements and attributes.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Colour for a community id.
pub fn community_color(id: u32) -> &'static str {
    PALETTE[id as usize % PALETTE.len()]
}

/// Draw the graph as a `size`×`size` SVG document.
///
/// `positions` comes from [`super::layout::spring_layout`]; nodes are filled
/// by their community in `partition` and labelled with their handle.
/// Returns `None` for an empty graph or when positions don't match the graph.
pub fn render_graph(
    graph: &InteractionGraph,
    positions: &[(f64, f64)],
    partition: &BTreeMap<String, u32>,
    size: u32,
    title: &str,
) -> Option<String> {
    if graph.node_count() == 0 || positions.len() != graph.node_count() {
        return None;
    }

    let extent = size as f64;
    let half = (extent - 2.0 * MARGIN) / 2.0;
    let project = |(x, y): (f64, f64)| (MARGIN + (x + 1.0) * half, MARGIN + (y + 1.0) * half);

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">"
    );
    svg.push_str("  <style>\n");
    svg.push_str("    .edge { stroke: #999; stroke-opacity: 0.5; }\n");
    svg.push_str("    .label { font-family: sans-serif; font-size: 8px; fill: #222; }\n");
    svg.push_str("  </style>\n");
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
    let _ = writeln!(
        svg,
        "  <text x=\"{:.1}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\" font-weight=\"bold\">{}</text>",
        extent / 2.0,
        escape_xml(title)
    );

    svg.push_str("  <g class=\"edges\">\n");
    for edge in graph.graph.edge_references() {
        if edge.source() == edge.target() {
            continue;
        }
        let (x1, y1) = project(positions[edge.source().index()]);
        let (x2, y2) = project(positions[edge.target().index()]);
        let width = 0.5 + (edge.weight().weight.ln_1p() * 0.5);
        let _ = writeln!(
            svg,
            "    <line class=\"edge\" x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke-width=\"{width:.2}\"/>"
        );
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g class=\"nodes\">\n");
    for idx in graph.graph.node_indices() {
        let handle = graph.handle(idx);
        let (x, y) = project(positions[idx.index()]);
        let fill = partition
            .get(handle)
            .map(|&c| community_color(c))
            .unwrap_or(UNASSIGNED);
        let handle = escape_xml(handle);
        let _ = writeln!(
            svg,
            "    <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"{NODE_RADIUS}\" fill=\"{fill}\"><title>{handle}</title></circle>"
        );
        let _ = writeln!(
            svg,
            "    <text class=\"label\" x=\"{:.1}\" y=\"{:.1}\">{handle}</text>",
            x + NODE_RADIUS + 1.0,
            y + 3.0
        );
    }
    svg.push_str("  </g>\n");
    svg.push_str("</svg>\n");

    Some(svg)
}
