//! Diagram records for rendering machines.
//!
//! The engine never depends on rendered output. [`Graph`] is the hand-off
//! format; a [`Renderer`] turns it into an artifact. [`DotRenderer`] emits
//! Graphviz DOT text.

use crate::core::{Machine, StateId};
use serde::{Deserialize, Serialize};

/// A state node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub state: StateId,
    pub initial: bool,
}

/// A labelled transition edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: StateId,
    pub to: StateId,
    pub label: String,
}

/// Node and edge records describing a machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// One node per state and one edge per transition, in declaration order.
    pub fn from_machine(machine: &Machine) -> Self {
        let nodes = machine
            .states()
            .map(|state| Node {
                state,
                initial: state == machine.initial_state(),
            })
            .collect();
        let edges = machine
            .transitions()
            .iter()
            .map(|t| Edge {
                from: t.from,
                to: t.to,
                label: format!("Input: {}, Output: {}", t.input, t.output),
            })
            .collect();
        Self { nodes, edges }
    }
}

/// Consumer of graph records.
pub trait Renderer {
    type Output;

    fn render(&self, graph: &Graph) -> Self::Output;
}

/// Renders a graph as Graphviz DOT source.
///
/// The graph name is always emitted as a quoted DOT id, so any string is
/// accepted.
///
/// # Example
///
/// ```rust
/// use mealy_mutant::core::Machine;
/// use mealy_mutant::render::{DotRenderer, Graph, Renderer};
///
/// let machine = Machine::build(2, 1, 1, 0, [(0, 0, 1, 0)]).unwrap();
/// let dot = DotRenderer::default().render(&Graph::from_machine(&machine));
///
/// assert!(dot.contains("0 [label=\"State 0\", shape=doublecircle];"));
/// assert!(dot.contains("0 -> 1 [label=\"Input: 0, Output: 0\"];"));
/// ```
#[derive(Clone, Debug)]
pub struct DotRenderer {
    pub name: String,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            name: "fsm".to_string(),
        }
    }
}

impl Renderer for DotRenderer {
    type Output = String;

    fn render(&self, graph: &Graph) -> String {
        let mut out = format!("digraph {} {{\n", quoted(&self.name));
        for node in &graph.nodes {
            let shape = if node.initial { "doublecircle" } else { "circle" };
            out.push_str(&format!(
                "    {} [label=\"State {}\", shape={}];\n",
                node.state, node.state, shape
            ));
        }
        for edge in &graph.edges {
            out.push_str(&format!(
                "    {} -> {} [label={}];\n",
                edge.from,
                edge.to,
                quoted(&edge.label)
            ));
        }
        out.push_str("}\n");
        out
    }
}

/// A DOT double-quoted id with embedded quotes and backslashes escaped.
fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_has_node_per_state_and_edge_per_transition() {
        let machine = Machine::build(3, 2, 2, 1, [(1, 0, 2, 1), (2, 1, 1, 0)]).unwrap();
        let graph = Graph::from_machine(&machine);

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(
            graph.nodes.iter().filter(|n| n.initial).collect::<Vec<_>>(),
            vec![&Node {
                state: 1,
                initial: true
            }]
        );
        assert_eq!(
            graph.edges[0],
            Edge {
                from: 1,
                to: 2,
                label: "Input: 0, Output: 1".to_string()
            }
        );
    }

    #[test]
    fn dot_output_is_well_formed() {
        let machine = Machine::build(2, 1, 1, 1, [(0, 0, 1, 0)]).unwrap();
        let dot = DotRenderer {
            name: "mutant".to_string(),
        }
        .render(&Graph::from_machine(&machine));

        assert!(dot.starts_with("digraph \"mutant\" {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("0 [label=\"State 0\", shape=circle];"));
        assert!(dot.contains("1 [label=\"State 1\", shape=doublecircle];"));
    }

    #[test]
    fn graph_name_is_quoted_and_escaped() {
        let machine = Machine::build(1, 1, 1, 0, [(0, 0, 0, 0)]).unwrap();
        let graph = Graph::from_machine(&machine);

        let dot = DotRenderer {
            name: "my fsm".to_string(),
        }
        .render(&graph);
        assert!(dot.starts_with("digraph \"my fsm\" {\n"));

        let dot = DotRenderer {
            name: r#"say "hi" \o/"#.to_string(),
        }
        .render(&graph);
        assert!(dot.starts_with(r#"digraph "say \"hi\" \\o/" {"#));
    }
}
