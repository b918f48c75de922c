use bitvec::prelude::BitVec;
use color_eyre::eyre::Result;
use log::warn;
use petgraph::dot::Dot;
use petgraph::graph::DiGraph;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::process::Command;

/// A transition label. Epsilon is kept apart from every character so that no input symbol can
/// ever match it, not even a literal 'ε'.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl From<char> for Symbol {
    fn from(ch: char) -> Self {
        Symbol::Char(ch)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(ch) => write!(f, "{}", ch),
        }
    }
}

/// Index level view of a finite automaton, used by the renderers. States are numbered
/// `0..get_num_states()`.
pub trait FA {
    fn get_num_states(&self) -> usize;
    fn get_state_label(&self, state_id: usize) -> &str;
    fn get_start_state_id(&self) -> Option<usize>;
    fn get_acceptor_states(&self) -> &BitVec<u8>;
    fn get_state_transitions(&self, state_id: usize) -> Vec<(&Symbol, usize)>;

    /// Render the automaton as a Graphviz document.
    fn to_dot(&self) -> String {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for state_id in 0..self.get_num_states() {
            let node = graph.add_node(self.get_state_label(state_id).to_string());
            node_map.insert(state_id, node);
        }

        for state_id in 0..self.get_num_states() {
            for (symbol, target) in self.get_state_transitions(state_id) {
                graph.add_edge(node_map[&state_id], node_map[&target], symbol.to_string());
            }
        }

        // Mark Start and Accept States

        for accept in self.get_acceptor_states().iter_ones() {
            let accept_node = node_map[&accept];
            graph[accept_node] = format!("{} (accept)", self.get_state_label(accept));
        }

        if let Some(start) = self.get_start_state_id() {
            let start_node = node_map[&start];
            graph[start_node] = format!("{} (start)", graph[start_node]);
        }

        Dot::new(&graph).to_string()
    }

    /// Write the automaton to `<filename>.dot` and, if Graphviz is installed, to `<filename>.jpg`.
    fn show_fa(&self, filename: &str) -> Result<()> {
        let dot_filename = format!("{}.dot", filename);
        let mut dot_file = File::create(&dot_filename)?;
        dot_file.write_all(self.to_dot().as_bytes())?;

        let jpg_filename = format!("{}.jpg", filename);
        match Command::new("dot")
            .args(["-Tjpg", &dot_filename, "-o", &jpg_filename])
            .output()
        {
            Ok(output) if output.status.success() => {
                println!("Automaton vizualization saved as {jpg_filename}");
            }
            Ok(output) => warn!(
                "Graphviz failed to render {dot_filename}: {}",
                String::from_utf8_lossy(&output.stderr)
            ),
            Err(error) => warn!("Graphviz is not available, only {dot_filename} was written: {error}"),
        }

        Ok(())
    }
}
