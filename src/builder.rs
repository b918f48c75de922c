/* Validating front end for building an automaton from untrusted input. The automaton itself
 * accepts anything; this layer rejects duplicates and references to states or symbols that were
 * never declared, and leaves the automaton untouched when it does. */

use crate::automaton::Automaton;
use crate::fa::Symbol;
use std::fmt;

/// Terminates a list of states, symbols, destinations or accepting states.
pub const END_KEYWORD: &str = "end";

/// Words which stand for an epsilon transition when read as a transition symbol.
pub const EPSILON_KEYWORDS: [&str; 2] = ["eps", "epsilon"];

/// List of possible errors while building an automaton
#[derive(Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A state name was empty
    EmptyState,
    /// A state name collides with a keyword of the builder
    ReservedWord(String),
    /// The state was already declared
    DuplicateState(String),
    /// The state was never declared
    UnknownState(String),
    /// A symbol was not exactly one character
    InvalidSymbol(String),
    /// The symbol is already part of the alphabet
    DuplicateSymbol(char),
    /// The symbol is not part of the alphabet
    UnknownSymbol(char),
    /// The state is already an accepting state
    DuplicateAccepting(String),
    /// No state has been declared yet
    NoStates,
    /// The automaton has no start state
    MissingStart,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyState => write!(f, "Error: State name cannot be empty!"),
            BuildError::ReservedWord(word) => {
                write!(f, "Error: '{}' is reserved and cannot be used here!", word)
            }
            BuildError::DuplicateState(state) => {
                write!(f, "Error: State '{}' was already added!", state)
            }
            BuildError::UnknownState(state) => write!(f, "Error: State '{}' does not exist!", state),
            BuildError::InvalidSymbol(symbol) => write!(
                f,
                "Error: '{}' is not a symbol! Enter exactly one character",
                symbol
            ),
            BuildError::DuplicateSymbol(symbol) => {
                write!(f, "Error: Symbol '{}' is already in the alphabet!", symbol)
            }
            BuildError::UnknownSymbol(symbol) => {
                write!(f, "Error: Symbol '{}' is not in the alphabet!", symbol)
            }
            BuildError::DuplicateAccepting(state) => {
                write!(f, "Error: State '{}' is already an accepting state!", state)
            }
            BuildError::NoStates => write!(f, "Error: At least one state is required!"),
            BuildError::MissingStart => write!(f, "Error: No start state was set!"),
        }
    }
}

impl std::error::Error for BuildError {}

#[derive(Debug, Default)]
pub struct Builder {
    automaton: Automaton,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            automaton: Automaton::new(),
        }
    }

    /// The automaton built so far.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn add_state(&mut self, label: &str) -> Result<(), BuildError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(BuildError::EmptyState);
        }
        if label == END_KEYWORD {
            return Err(BuildError::ReservedWord(label.to_string()));
        }
        if self.automaton.is_declared(label) {
            return Err(BuildError::DuplicateState(label.to_string()));
        }
        self.automaton.add_state(label);
        Ok(())
    }

    pub fn check_has_states(&self) -> Result<(), BuildError> {
        if self.automaton.get_states().is_empty() {
            Err(BuildError::NoStates)
        } else {
            Ok(())
        }
    }

    pub fn check_state(&self, label: &str) -> Result<(), BuildError> {
        if self.automaton.is_declared(label) {
            Ok(())
        } else {
            Err(BuildError::UnknownState(label.to_string()))
        }
    }

    pub fn set_start(&mut self, label: &str) -> Result<(), BuildError> {
        let label = label.trim();
        self.check_state(label)?;
        self.automaton.set_start(label);
        Ok(())
    }

    pub fn add_symbol(&mut self, token: &str) -> Result<(), BuildError> {
        let symbol = single_char(token)?;
        if self.automaton.get_alphabet().contains(&symbol) {
            return Err(BuildError::DuplicateSymbol(symbol));
        }
        self.automaton.add_symbol(symbol);
        Ok(())
    }

    /// Read a transition symbol: one of the epsilon keywords, or a character of the alphabet.
    pub fn parse_symbol(&self, token: &str) -> Result<Symbol, BuildError> {
        let token = token.trim();
        if EPSILON_KEYWORDS.contains(&token) {
            return Ok(Symbol::Epsilon);
        }
        let symbol = single_char(token)?;
        if !self.automaton.get_alphabet().contains(&symbol) {
            return Err(BuildError::UnknownSymbol(symbol));
        }
        Ok(Symbol::Char(symbol))
    }

    pub fn add_transition(
        &mut self,
        origin: &str,
        symbol: Symbol,
        dest: &str,
    ) -> Result<(), BuildError> {
        let origin = origin.trim();
        let dest = dest.trim();
        self.check_state(origin)?;
        if let Symbol::Char(ch) = symbol {
            if !self.automaton.get_alphabet().contains(&ch) {
                return Err(BuildError::UnknownSymbol(ch));
            }
        }
        self.check_state(dest)?;
        self.automaton.add_transition(origin, symbol, dest);
        Ok(())
    }

    pub fn add_accepting(&mut self, label: &str) -> Result<(), BuildError> {
        let label = label.trim();
        self.check_state(label)?;
        if self.automaton.is_accepting(label) {
            return Err(BuildError::DuplicateAccepting(label.to_string()));
        }
        self.automaton.add_accepting(label);
        Ok(())
    }

    pub fn finish(self) -> Result<Automaton, BuildError> {
        if self.automaton.get_start_state().is_none() {
            return Err(BuildError::MissingStart);
        }
        self.automaton.log_summary();
        Ok(self.automaton)
    }
}

fn single_char(token: &str) -> Result<char, BuildError> {
    let token = token.trim();
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(BuildError::InvalidSymbol(token.to_string())),
    }
}
