/* Simulation of the general (non-deterministic, epsilon aware) automaton. The set of active
 * states is tracked as a bitvec over the interned state indices, so no path is ever enumerated
 * and epsilon cycles cannot stall the evaluation. */

use crate::automaton::Automaton;
use crate::fa::Symbol;
use bitvec::prelude::*;
use log::{debug, trace};
use std::collections::HashSet;
use std::fmt;

/// Active states of the automaton after the initial closure (`symbol` is `None`) or after
/// consuming `symbol`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub symbol: Option<char>,
    pub active: Vec<String>,
    pub accepting: bool,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            None => write!(f, "start")?,
            Some(ch) => write!(f, "'{ch}'")?,
        }
        write!(f, " -> {{{}}}", self.active.join(", "))?;
        if self.accepting {
            write!(f, " accepting")?;
        }
        Ok(())
    }
}

impl Automaton {
    /// Every state reachable from `states` through zero or more epsilon transitions, the input
    /// states included. Labels the automaton has never seen have no transitions and are returned
    /// unchanged.
    pub fn epsilon_closure<'a, I>(&self, states: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut result = HashSet::new();
        let mut seed = self.empty_set();

        for label in states {
            match self.state_id(label) {
                Some(state_id) => seed.set(state_id, true),
                None => {
                    result.insert(label.to_string());
                }
            }
        }

        let closure = self.closure_of(&seed);
        result.extend(closure.iter_ones().map(|state_id| self.states[state_id].get_label().to_string()));
        result
    }

    pub(crate) fn closure_of(&self, states: &BitVec<u8>) -> BitVec<u8> {
        let mut epsilon_closure = states.clone();

        let mut stack: Vec<usize> = states.iter_ones().collect();

        while let Some(state) = stack.pop() {
            for &target in self.states[state].targets(&Symbol::Epsilon) {
                if !epsilon_closure[target] {
                    epsilon_closure.set(target, true);
                    stack.push(target);
                }
            }
        }

        epsilon_closure
    }

    // This function returns the set of states accessible via char c within the set q

    fn delta(&self, q: &BitVec<u8>, c: char) -> BitVec<u8> {
        let mut result = self.empty_set();
        let symbol = Symbol::Char(c);
        for state in q.iter_ones() {
            for &target in self.states[state].targets(&symbol) {
                result.set(target, true);
            }
        }
        result
    }

    fn start_closure(&self) -> BitVec<u8> {
        let mut start = self.empty_set();
        if let Some(start_state) = self.start_state {
            start.set(start_state, true);
        }
        self.closure_of(&start)
    }

    fn has_accepting(&self, active: &BitVec<u8>) -> bool {
        active.iter_ones().any(|state_id| self.accept_states[state_id])
    }

    fn labels_of(&self, active: &BitVec<u8>) -> Vec<String> {
        let mut labels: Vec<String> = active
            .iter_ones()
            .map(|state_id| self.states[state_id].get_label().to_string())
            .collect();
        labels.sort();
        labels
    }

    /// Decide whether the automaton accepts `input`, treating every `char` as one symbol.
    pub fn accepts(&self, input: &str) -> bool {
        self.accepts_symbols(input.chars())
    }

    /// Subset simulation: the active set starts as the closure of the start state and, for each
    /// symbol, becomes the closure of everything reachable on that symbol. The string is rejected
    /// as soon as the active set runs empty.
    pub fn accepts_symbols<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        let mut active = self.start_closure();

        for (position, c) in input.into_iter().enumerate() {
            let reachable = self.delta(&active, c);
            if reachable.not_any() {
                debug!("rejected at position {position}: no transition on {c:?}");
                return false;
            }
            active = self.closure_of(&reachable);
            trace!("after {c:?}: {:?}", self.labels_of(&active));
        }

        let accepted = self.has_accepting(&active);
        debug!("input consumed, accepted: {accepted}");
        accepted
    }

    /// The active states after the initial closure and after every consumed symbol. The trace
    /// ends early, with an empty step, at the first symbol that has no transition.
    pub fn trace(&self, input: &str) -> Vec<TraceStep> {
        let mut active = self.start_closure();
        let mut steps = vec![TraceStep {
            symbol: None,
            active: self.labels_of(&active),
            accepting: self.has_accepting(&active),
        }];

        for c in input.chars() {
            let reachable = self.delta(&active, c);
            if reachable.not_any() {
                steps.push(TraceStep {
                    symbol: Some(c),
                    active: Vec::new(),
                    accepting: false,
                });
                break;
            }
            active = self.closure_of(&reachable);
            steps.push(TraceStep {
                symbol: Some(c),
                active: self.labels_of(&active),
                accepting: self.has_accepting(&active),
            });
        }

        steps
    }
}
