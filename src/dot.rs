//! Transition system to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **States** are rendered as circles, labeled with their name and, below it,
//!   the set of atomic propositions holding in them
//! - **Initial states** use a distinct shape and get an incoming arrow from a
//!   point-shaped source node
//! - **Edges** are one per `(source, action, target)` triple, labeled with the
//!   action; the silent action is shown as `ε`
//!
//! # Examples
//!
//! ```
//! use lts_rs::models::beverage_vending_machine;
//!
//! let ts = beverage_vending_machine();
//! let dot = ts.to_dot().unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::BTreeMap;

use crate::proposition;
use crate::state::State;
use crate::system::TransitionSystem;

/// Configuration options for DOT output generation.
///
/// ```
/// use lts_rs::dot::DotConfig;
/// use lts_rs::models::simple_chain;
///
/// let config = DotConfig {
///     node_shape: "box",
///     show_labels: false,
///     ..DotConfig::default()
/// };
/// let dot = simple_chain().to_dot_with_config(&config).unwrap();
/// assert!(!dot.contains("{A}"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for states (default: "circle")
    pub node_shape: &'static str,
    /// Shape for initial states (default: "doublecircle")
    pub initial_shape: &'static str,
    /// Style for transition edges (default: "solid")
    pub edge_style: &'static str,
    /// Whether to print the label set under the state name (default: true)
    pub show_labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            initial_shape: "doublecircle",
            edge_style: "solid",
            show_labels: true,
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl TransitionSystem {
    /// Converts the system to DOT format with the default configuration.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the system to DOT format.
    ///
    /// States are numbered `s0, s1, ...` in declaration order. Transitions
    /// whose endpoints are not declared states are skipped, so an unchecked
    /// system still renders.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let ids: BTreeMap<&State, usize> = self.states().iter().enumerate().map(|(i, s)| (s, i)).collect();

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir=LR;")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        for (i, state) in self.states().iter().enumerate() {
            let mut label = escape(&state.to_string());
            if config.show_labels {
                label.push_str("\\n");
                label.push_str(&escape(&proposition::display_label(self.label(state))));
            }
            if self.is_initial(state) {
                writeln!(dot, "s{} [shape={}, label=\"{}\"];", i, config.initial_shape, label)?;
            } else {
                writeln!(dot, "s{} [label=\"{}\"];", i, label)?;
            }
        }

        // Entry arrows
        for (k, state) in self.initial_states().iter().enumerate() {
            if let Some(i) = ids.get(state) {
                writeln!(dot, "init{} [shape=point, label=\"\"];", k)?;
                writeln!(dot, "init{} -> s{};", k, i)?;
            }
        }

        for (source, per_action) in self.transitions().iter() {
            let Some(from) = ids.get(source) else { continue };
            for (action, targets) in per_action.iter() {
                for target in targets {
                    let Some(to) = ids.get(target) else { continue };
                    writeln!(
                        dot,
                        "s{} -> s{} [label=\"{}\", style={}];",
                        from,
                        to,
                        escape(&action.to_string()),
                        config.edge_style
                    )?;
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
