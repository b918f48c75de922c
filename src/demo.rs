use crate::automaton::Automaton;
use color_eyre::eyre::Result;
use std::io::Write;

/// A predefined automaton together with the verdicts it is expected to produce.
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub automaton: Automaton,
    pub cases: Vec<(&'static str, bool)>,
}

/// NFA accepting the strings over {a, b} which end in "ab".
pub fn ending_in_ab() -> Demo {
    let mut automaton = Automaton::new();
    for state in ["q0", "q1", "q2"] {
        automaton.add_state(state);
    }
    automaton.add_symbol('a');
    automaton.add_symbol('b');

    automaton.add_transition("q0", 'a', "q0"); // Stay in q0 on anything
    automaton.add_transition("q0", 'b', "q0");
    automaton.add_transition("q0", 'a', "q1"); // Guess that the final "ab" starts here
    automaton.add_transition("q1", 'b', "q2");

    automaton.set_start("q0");
    automaton.add_accepting("q2");

    Demo {
        name: "Non-deterministic finite automaton",
        description: "Accepts the strings which end with \"ab\".",
        automaton,
        cases: vec![
            ("ab", true),
            ("aab", true),
            ("bab", true),
            ("aaab", true),
            ("b", false),
            ("a", false),
            ("aba", false),
            ("", false),
        ],
    }
}

/// Epsilon-NFA accepting a*b.
pub fn a_star_b() -> Demo {
    let mut automaton = Automaton::new();
    for state in ["q0", "q1", "q2"] {
        automaton.add_state(state);
    }
    // Epsilon is implicit, it never enters the alphabet
    automaton.add_symbol('a');
    automaton.add_symbol('b');

    automaton.add_epsilon_transition("q0", "q1");
    automaton.add_transition("q1", 'a', "q1");
    automaton.add_transition("q1", 'b', "q2");

    automaton.set_start("q0");
    automaton.add_accepting("q2");

    Demo {
        name: "Non-deterministic finite automaton with an epsilon transition",
        description: "Accepts \"a*b\": zero or more 'a's followed by a single 'b'.",
        automaton,
        cases: vec![
            ("b", true),
            ("ab", true),
            ("aab", true),
            ("aaab", true),
            ("", false),
            ("a", false),
            ("ba", false),
        ],
    }
}

/// DFA accepting exactly "ab".
pub fn exactly_ab() -> Demo {
    let mut automaton = Automaton::new();
    for state in ["q0", "q1", "q2"] {
        automaton.add_state(state);
    }
    automaton.add_symbol('a');
    automaton.add_symbol('b');

    automaton.add_transition("q0", 'a', "q1");
    automaton.add_transition("q1", 'b', "q2");

    automaton.set_start("q0");
    automaton.add_accepting("q2");

    Demo {
        name: "Deterministic finite automaton",
        description: "Accepts exactly the string \"ab\".",
        automaton,
        cases: vec![
            ("ab", true),
            ("", false),
            ("a", false),
            ("b", false),
            ("ba", false),
            ("abb", false),
        ],
    }
}

pub fn all() -> Vec<Demo> {
    vec![ending_in_ab(), a_star_b(), exactly_ab()]
}

impl Demo {
    /// Evaluate one case, taking the deterministic path when the automaton allows it.
    pub fn evaluate(&self, input: &str) -> bool {
        if self.automaton.is_deterministic() {
            self.automaton.accepts_deterministic(input)
        } else {
            self.automaton.accepts(input)
        }
    }

    pub fn print<W: Write>(&self, output: &mut W) -> Result<()> {
        writeln!(output, "Example of a {}:", self.name)?;
        writeln!(output, "{}", self.description)?;
        writeln!(output, "{}", self.automaton)?;
        writeln!(output, "------------------------------------")?;

        for (input, expected) in &self.cases {
            let accepted = self.evaluate(input);
            let verdict = if accepted { "accepted" } else { "rejected" };
            let check = if accepted == *expected {
                "correct"
            } else {
                "INCORRECT"
            };
            writeln!(output, "String \"{input}\" -> {verdict} ({check})")?;
        }
        Ok(())
    }
}

/// Print every predefined example along with the verdict for each of its cases.
pub fn run<W: Write>(output: &mut W) -> Result<()> {
    for (index, demo) in all().iter().enumerate() {
        if index > 0 {
            writeln!(output)?;
        }
        demo.print(output)?;
    }
    Ok(())
}
