/* Deterministic fast path: a single current state and one table lookup per symbol. */

use crate::automaton::Automaton;
use crate::fa::Symbol;
use log::debug;

impl Automaton {
    /// True when the automaton has no epsilon transitions and at most one destination for every
    /// `(state, symbol)` pair. For such automata `accepts_deterministic` and `accepts` agree.
    pub fn is_deterministic(&self) -> bool {
        self.states.iter().all(|state| {
            state.get_transitions().iter().all(|(symbol, targets)| match symbol {
                Symbol::Epsilon => targets.is_empty(),
                Symbol::Char(_) => targets.len() <= 1,
            })
        })
    }

    /// Evaluate `input` following a single path from the start state. Epsilon transitions are
    /// never taken and, where a pair has several destinations, the first one added is followed.
    pub fn accepts_deterministic(&self, input: &str) -> bool {
        self.accepts_deterministic_symbols(input.chars())
    }

    pub fn accepts_deterministic_symbols<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        let mut current = match self.start_state {
            Some(start_state) => start_state,
            None => {
                debug!("rejected: no start state");
                return false;
            }
        };

        for (position, c) in input.into_iter().enumerate() {
            match self.states[current].targets(&Symbol::Char(c)).first() {
                Some(&next) => current = next,
                None => {
                    debug!("rejected at position {position}: no transition on {c:?}");
                    return false;
                }
            }
        }

        self.accept_states[current]
    }
}
