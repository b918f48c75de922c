/* The automaton data model. Every label the caller ever mentions is interned into a dense state
 * index, so that sets of states can be kept as bit vectors during evaluation. */

use crate::fa::{Symbol, FA};
use bitvec::prelude::*;
use log::debug;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AutomatonState {
    label: String,
    transitions: HashMap<Symbol, Vec<usize>>, // Destinations in the order they were added
}

impl AutomatonState {
    fn new(label: &str) -> Self {
        AutomatonState {
            label: label.to_string(),
            transitions: HashMap::new(),
        }
    }

    fn add_transition(&mut self, symbol: Symbol, to: usize) {
        let targets = self.transitions.entry(symbol).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    pub fn get_label(&self) -> &str {
        &self.label
    }

    pub fn get_transitions(&self) -> &HashMap<Symbol, Vec<usize>> {
        &self.transitions
    }

    /// Destinations reachable on `symbol`, empty if there is no such transition.
    pub fn targets(&self, symbol: &Symbol) -> &[usize] {
        self.transitions
            .get(symbol)
            .map(|targets| targets.as_slice())
            .unwrap_or(&[])
    }
}

/// A finite automaton over `char` symbols whose states are identified by free form labels.
///
/// The same model covers deterministic automata, non-deterministic automata and automata with
/// epsilon transitions. Construction is permissive: duplicates and references to undeclared
/// states are stored as given and simply behave as ordinary labels during evaluation.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    pub(crate) states: Vec<AutomatonState>,
    pub(crate) state_ids: HashMap<String, usize>,
    pub(crate) declared_states: Vec<usize>,
    pub(crate) alphabet: Vec<char>,
    pub(crate) start_state: Option<usize>,
    pub(crate) accept_states: BitVec<u8>,
}

impl Automaton {
    pub fn new() -> Self {
        Automaton {
            states: Vec::new(),
            state_ids: HashMap::new(),
            declared_states: Vec::new(),
            alphabet: Vec::new(),
            start_state: None,
            accept_states: BitVec::new(),
        }
    }

    fn intern(&mut self, label: &str) -> usize {
        if let Some(&state_id) = self.state_ids.get(label) {
            return state_id;
        }
        let state_id = self.states.len();
        self.states.push(AutomatonState::new(label));
        self.accept_states.push(false);
        self.state_ids.insert(label.to_string(), state_id);
        state_id
    }

    pub(crate) fn state_id(&self, label: &str) -> Option<usize> {
        self.state_ids.get(label).copied()
    }

    pub(crate) fn empty_set(&self) -> BitVec<u8> {
        BitVec::repeat(false, self.states.len())
    }

    pub fn add_state(&mut self, label: &str) {
        let state_id = self.intern(label);
        self.declared_states.push(state_id);
    }

    pub fn add_symbol(&mut self, symbol: char) {
        self.alphabet.push(symbol);
    }

    /// Add `dest` to the destinations of `(origin, symbol)`. Calling this again for the same
    /// origin and symbol adds another destination instead of replacing the previous one.
    pub fn add_transition(&mut self, origin: &str, symbol: impl Into<Symbol>, dest: &str) {
        let from = self.intern(origin);
        let to = self.intern(dest);
        self.states[from].add_transition(symbol.into(), to);
    }

    pub fn add_epsilon_transition(&mut self, origin: &str, dest: &str) {
        self.add_transition(origin, Symbol::Epsilon, dest);
    }

    pub fn set_start(&mut self, label: &str) {
        let state_id = self.intern(label);
        self.start_state = Some(state_id);
    }

    pub fn add_accepting(&mut self, label: &str) {
        let state_id = self.intern(label);
        self.accept_states.set(state_id, true);
    }

    /// Declared states in the order they were added, duplicates included.
    pub fn get_states(&self) -> Vec<&str> {
        self.declared_states
            .iter()
            .map(|&state_id| self.states[state_id].get_label())
            .collect()
    }

    pub fn get_alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Every `(origin, symbol, destination)` triple, grouped by origin in the order the labels
    /// were first seen and by symbol with epsilon first.
    pub fn get_transitions(&self) -> Vec<(&str, &Symbol, &str)> {
        (0..self.states.len())
            .flat_map(|state_id| {
                self.get_state_transitions(state_id)
                    .into_iter()
                    .map(move |(symbol, target)| {
                        (self.get_state_label(state_id), symbol, self.get_state_label(target))
                    })
            })
            .collect()
    }

    pub fn get_start_state(&self) -> Option<&str> {
        self.start_state
            .map(|state_id| self.states[state_id].get_label())
    }

    pub fn get_accepting_states(&self) -> Vec<&str> {
        self.accept_states
            .iter_ones()
            .map(|state_id| self.states[state_id].get_label())
            .collect()
    }

    pub fn get_state(&self, label: &str) -> Option<&AutomatonState> {
        self.state_id(label).map(|state_id| &self.states[state_id])
    }

    pub fn is_declared(&self, label: &str) -> bool {
        match self.state_id(label) {
            Some(state_id) => self.declared_states.contains(&state_id),
            None => false,
        }
    }

    pub fn is_accepting(&self, label: &str) -> bool {
        match self.state_id(label) {
            Some(state_id) => self.accept_states[state_id],
            None => false,
        }
    }

    pub(crate) fn log_summary(&self) {
        debug!(
            "automaton with {} declared states, {} symbols and {} transitions, start {:?}",
            self.declared_states.len(),
            self.alphabet.len(),
            self.get_transitions().len(),
            self.get_start_state()
        );
    }
}

impl FA for Automaton {
    fn get_num_states(&self) -> usize {
        self.states.len()
    }

    fn get_state_label(&self, state_id: usize) -> &str {
        self.states[state_id].get_label()
    }

    fn get_start_state_id(&self) -> Option<usize> {
        self.start_state
    }

    fn get_acceptor_states(&self) -> &BitVec<u8> {
        &self.accept_states
    }

    fn get_state_transitions(&self, state_id: usize) -> Vec<(&Symbol, usize)> {
        let state = &self.states[state_id];
        let mut symbols: Vec<&Symbol> = state.transitions.keys().collect();
        symbols.sort();

        let mut transition_list = Vec::new();
        for symbol in symbols {
            for &target in state.targets(symbol) {
                transition_list.push((symbol, target));
            }
        }
        transition_list
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start state: {}", self.get_start_state().unwrap_or("<unset>"))?;
        writeln!(f, "States: [{}]", self.get_states().join(", "))?;

        let alphabet: Vec<String> = self.alphabet.iter().map(|ch| format!("'{ch}'")).collect();
        writeln!(f, "Alphabet: [{}]", alphabet.join(", "))?;

        writeln!(f, "Transitions:")?;
        for (origin, symbol, dest) in self.get_transitions() {
            writeln!(f, "  {origin},'{symbol}' --> {dest}")?;
        }

        write!(f, "Accepting states: [{}]", self.get_accepting_states().join(", "))
    }
}
