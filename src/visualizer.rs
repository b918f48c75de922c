use std::collections::HashMap;

use color_eyre::eyre::{eyre, Result};
use eframe::{run_native, App, CreationContext, NativeOptions};
use egui::Color32;
use egui_graphs::{
    DefaultGraphView, Graph, SettingsInteraction, SettingsNavigation, SettingsStyle,
};
use petgraph::{graph::EdgeIndex, graph::NodeIndex, prelude::StableGraph};

use crate::fa::FA;

struct Visualizer {
    graph: Graph,
}

impl Visualizer {
    fn new(_: &CreationContext<'_>, graph: Graph) -> Self {
        Visualizer { graph }
    }
}

impl App for Visualizer {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let navigation_settings = &SettingsNavigation::new()
                .with_zoom_and_pan_enabled(true)
                .with_fit_to_screen_enabled(true);
            let interactive_settings = &SettingsInteraction::new()
                .with_dragging_enabled(true)
                .with_node_clicking_enabled(true)
                .with_node_selection_enabled(true)
                .with_edge_clicking_enabled(true)
                .with_edge_selection_enabled(true);
            let style_settings = &SettingsStyle::default().with_labels_always(true);
            ui.add(
                &mut DefaultGraphView::new(&mut self.graph)
                    .with_styles(style_settings)
                    .with_interactions(interactive_settings)
                    .with_navigations(navigation_settings),
            );
        });
    }
}

fn generate_graph<T: FA>(fa: &T) -> Graph {
    let mut stable_graph: StableGraph<(), ()> = StableGraph::new();

    let num_states = fa.get_num_states();

    let start_node_color = Color32::from_rgb(20, 67, 130);
    let accept_node_color = Color32::from_rgb(20, 130, 90);

    // Parallel transitions share one edge, labelled with all their symbols
    let mut edge_map: HashMap<(NodeIndex, NodeIndex), (EdgeIndex, Vec<String>)> = HashMap::new();

    for _state_idx in 0..num_states {
        stable_graph.add_node(());
    }

    for state_idx in 0..num_states {
        for (symbol, target) in fa.get_state_transitions(state_idx) {
            let key = (NodeIndex::new(state_idx), NodeIndex::new(target));
            let entry = edge_map
                .entry(key)
                .or_insert_with(|| (stable_graph.add_edge(key.0, key.1, ()), Vec::new()));
            entry.1.push(symbol.to_string());
        }
    }

    let mut graph = Graph::from(&stable_graph);

    for state_idx in 0..num_states {
        if let Some(node) = graph.node_mut(NodeIndex::new(state_idx)) {
            node.set_label(fa.get_state_label(state_idx).to_string());
        }
    }

    for accept_state in fa.get_acceptor_states().iter_ones() {
        if let Some(accept_node) = graph.node_mut(NodeIndex::new(accept_state)) {
            accept_node.set_color(accept_node_color);
        }
    }

    if let Some(start_state) = fa.get_start_state_id() {
        if let Some(start_node) = graph.node_mut(NodeIndex::new(start_state)) {
            start_node.set_color(start_node_color);
        }
    }

    for (edge_idx, labels) in edge_map.into_values() {
        if let Some(edge) = graph.edge_mut(edge_idx) {
            edge.set_label(labels.join(", "));
        }
    }

    graph
}

/// Opens a window showing the finite automaton provided. Blocks until the window is closed.
pub fn visualize<T: FA>(fa: &T) -> Result<()> {
    let graph = generate_graph(fa);
    run_native(
        "finite automata visualizer",
        NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(Visualizer::new(cc, graph)))),
    )
    .map_err(|err| eyre!("Failed to open the visualizer window: {err}"))
}
