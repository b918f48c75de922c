mod integration_tests_helper {

    use fasim::{Automaton, Builder, Symbol};

    pub fn get_automaton(
        states: &[&str],
        transitions: &[(&str, Symbol, &str)],
        start: &str,
        accepting: &[&str],
    ) -> Automaton {
        let mut automaton = Automaton::new();
        for state in states {
            automaton.add_state(state);
        }
        for (origin, symbol, dest) in transitions {
            if let Symbol::Char(ch) = symbol {
                if !automaton.get_alphabet().contains(ch) {
                    automaton.add_symbol(*ch);
                }
            }
            automaton.add_transition(origin, symbol.clone(), dest);
        }
        automaton.set_start(start);
        for state in accepting {
            automaton.add_accepting(state);
        }
        automaton
    }

    /// Accepts (a|b)*a
    pub fn get_ending_in_a() -> Automaton {
        get_automaton(
            &["S", "A"],
            &[
                ("S", Symbol::Char('a'), "S"),
                ("S", Symbol::Char('a'), "A"),
                ("S", Symbol::Char('b'), "S"),
            ],
            "S",
            &["A"],
        )
    }

    pub fn get_built(states: &[&str], alphabet: &[&str]) -> Builder {
        let mut builder = Builder::new();
        for state in states {
            assert!(builder.add_state(state).is_ok());
        }
        for symbol in alphabet {
            assert!(builder.add_symbol(symbol).is_ok());
        }
        builder
    }
}

mod integration_tests {
    use crate::integration_tests_helper::{get_automaton, get_built, get_ending_in_a};

    use color_eyre::eyre::Result;
    use fasim::demo;
    use fasim::{BuildError, Session, Symbol};
    use std::collections::HashSet;
    use std::io::Cursor;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_ending_in_a() {
        let nfa = get_ending_in_a();

        for input in ["a", "ba", "bba", "aa"] {
            assert!(nfa.accepts(input), "{input:?} should be accepted");
        }
        for input in ["", "b", "ab", "bab", "bb", "ca"] {
            assert!(!nfa.accepts(input), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_unknown_symbol_rejects_regardless_of_suffix() {
        let nfa = get_automaton(
            &["q0"],
            &[("q0", Symbol::Char('a'), "q0")],
            "q0",
            &["q0"],
        );

        assert!(nfa.accepts("aaa"));
        assert!(!nfa.accepts("axa"));
        assert!(!nfa.accepts("xaaaa"));
        assert!(!nfa.accepts_deterministic("axa"));
    }

    #[test]
    fn test_deterministic_forms_agree() {
        let dfa = get_automaton(
            &["even", "odd"],
            &[
                ("even", Symbol::Char('0'), "even"),
                ("even", Symbol::Char('1'), "odd"),
                ("odd", Symbol::Char('0'), "odd"),
                ("odd", Symbol::Char('1'), "even"),
            ],
            "even",
            &["even"],
        );
        assert!(dfa.is_deterministic());

        let inputs = ["", "0", "1", "11", "101", "1101", "0110", "2", "1x1"];
        for input in inputs {
            assert_eq!(
                dfa.accepts(input),
                dfa.accepts_deterministic(input),
                "forms disagree on {input:?}"
            );
        }
        assert!(dfa.accepts("0110"));
        assert!(!dfa.accepts("1101"));
    }

    #[test]
    fn test_epsilon_cycle_with_symbols() {
        let nfa = get_automaton(
            &["q0", "q1", "q2"],
            &[
                ("q0", Symbol::Epsilon, "q1"),
                ("q1", Symbol::Epsilon, "q0"),
                ("q1", Symbol::Char('a'), "q2"),
                ("q2", Symbol::Epsilon, "q0"),
            ],
            "q0",
            &["q2"],
        );

        let expected: HashSet<String> = ["q0", "q1", "q2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(nfa.epsilon_closure(["q2"]), expected);
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("aaaa"));
        assert!(!nfa.accepts(""));
    }

    #[test]
    fn test_concurrent_evaluation() {
        let nfa = Arc::new(get_ending_in_a());

        let handles: Vec<_> = ["a", "ab", "bba", "bbb"]
            .into_iter()
            .map(|input| {
                let nfa = Arc::clone(&nfa);
                thread::spawn(move || (input, nfa.accepts(input)))
            })
            .collect();

        for handle in handles {
            let (input, accepted) = handle.join().unwrap();
            assert_eq!(accepted, input.ends_with('a'));
        }
    }

    #[test]
    fn test_builder_errors_through_eyre() -> Result<()> {
        let mut builder = get_built(&["q0", "q1"], &["a"]);

        builder.set_start("q0")?;
        builder.add_transition("q0", Symbol::Char('a'), "q1")?;
        builder.add_accepting("q1")?;

        let result: Result<()> = builder
            .add_transition("q0", Symbol::Char('b'), "q1")
            .map_err(Into::into);
        let err = result.unwrap_err();

        match err.downcast_ref() {
            Some(BuildError::UnknownSymbol('b')) => {}
            _ => unreachable!(),
        }

        let automaton = builder.finish()?;
        assert!(automaton.accepts("a"));
        Ok(())
    }

    #[test]
    fn test_session_builds_epsilon_automaton() {
        let script = "qe0\nqe1\nqe2\nend\nqe0\na\nb\nend\n\
            qe0\nepsilon\nqe1\nend\n\
            qe1\na\nqe1\nend\n\
            qe1\nb\nqe2\nend\n\
            end\nqe2\nend\n\
            b\naaab\nba\n\nquit\n";

        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new());
        assert!(session.build_and_test().unwrap());

        let automaton = session.last_built().unwrap();
        assert!(!automaton.is_deterministic());
        assert!(automaton.accepts("aab"));

        let output = String::from_utf8(session.into_output()).unwrap();
        assert!(output.contains("qe0,'ε' --> qe1"));
        assert_eq!(output.matches("String accepted").count(), 2);
        assert_eq!(output.matches("String rejected").count(), 2);
    }

    #[test]
    fn test_demos_match_expectations() {
        let mut output: Vec<u8> = Vec::new();
        demo::run(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        let expected_cases: usize = demo::all().iter().map(|demo| demo.cases.len()).sum();
        assert_eq!(output.matches("(correct)").count(), expected_cases);
    }
}
