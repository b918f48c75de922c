/* Line based interactive front end: main menu, step by step construction of an automaton and
 * string testing. Every request goes through the Builder, errors are reported and the same
 * question is asked again. Running out of input ends the session at any point. */

use crate::automaton::Automaton;
use crate::builder::{Builder, END_KEYWORD};
use crate::demo;
use crate::fa::FA;
use color_eyre::eyre::Result;
use log::{debug, info};
use std::io::{BufRead, Write};

/// Ends the string testing loop.
pub const QUIT_KEYWORD: &str = "quit";

const SEPARATOR: &str = "------------------------------------";

pub struct Session<R: BufRead, W: Write> {
    input: R,
    output: W,
    show_trace: bool,
    save_dot: Option<String>,
    last_built: Option<Automaton>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Session {
            input,
            output,
            show_trace: false,
            save_dot: None,
            last_built: None,
        }
    }

    /// Print the active states for every tested string.
    pub fn with_trace(mut self, show_trace: bool) -> Self {
        self.show_trace = show_trace;
        self
    }

    /// Save every built automaton as `<file>.dot` (and `<file>.jpg` when Graphviz is present).
    pub fn with_save_dot(mut self, save_dot: Option<String>) -> Self {
        self.save_dot = save_dot;
        self
    }

    /// The most recently built automaton, if any.
    pub fn last_built(&self) -> Option<&Automaton> {
        self.last_built.as_ref()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write `text` and read one line, without its line terminator. None at the end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    pub fn run_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\nMain menu:")?;
            writeln!(self.output, "1. Run the predefined examples")?;
            writeln!(self.output, "2. Build a new automaton")?;
            writeln!(self.output, "3. Quit")?;

            let choice = match self.prompt("Choose an option: ")? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            match choice.trim() {
                "1" => demo::run(&mut self.output)?,
                "2" => {
                    if !self.build_and_test()? {
                        return Ok(());
                    }
                }
                "3" => {
                    writeln!(self.output, "Exiting.")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option, please try again.")?,
            }
            writeln!(self.output, "{SEPARATOR}")?;
        }
    }

    /// Build an automaton and then test strings against it. Returns false if the input ran out.
    pub fn build_and_test(&mut self) -> Result<bool> {
        match self.build()? {
            Some(automaton) => {
                let finished = self.test_strings(&automaton)?;
                self.last_built = Some(automaton);
                Ok(finished)
            }
            None => Ok(false),
        }
    }

    /// Walk through the construction of an automaton. None if the input ran out first.
    pub fn build(&mut self) -> Result<Option<Automaton>> {
        writeln!(self.output, "\n==== Build your automaton ====")?;
        let mut builder = Builder::new();

        if !self.read_states(&mut builder)?
            || !self.read_start_state(&mut builder)?
            || !self.read_alphabet(&mut builder)?
            || !self.read_transitions(&mut builder)?
            || !self.read_accepting_states(&mut builder)?
        {
            debug!("input ended while building the automaton");
            return Ok(None);
        }

        let automaton = builder.finish()?;
        writeln!(self.output, "\nAutomaton built:\n{automaton}")?;

        if let Some(filename) = &self.save_dot {
            automaton.show_fa(filename)?;
            info!("automaton saved to {filename}.dot");
        }

        Ok(Some(automaton))
    }

    fn read_states(&mut self, builder: &mut Builder) -> Result<bool> {
        writeln!(
            self.output,
            "Enter the states one at a time. Type \"{END_KEYWORD}\" to finish:"
        )?;
        loop {
            let line = match self.prompt("> ")? {
                Some(line) => line,
                None => return Ok(false),
            };
            let label = line.trim();

            if label == END_KEYWORD {
                match builder.check_has_states() {
                    Ok(()) => return Ok(true),
                    Err(err) => writeln!(self.output, "{err}")?,
                }
                continue;
            }

            match builder.add_state(label) {
                Ok(()) => writeln!(self.output, "State '{label}' added.")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn read_start_state(&mut self, builder: &mut Builder) -> Result<bool> {
        loop {
            let line = match self.prompt("Enter the start state: ")? {
                Some(line) => line,
                None => return Ok(false),
            };
            match builder.set_start(&line) {
                Ok(()) => return Ok(true),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn read_alphabet(&mut self, builder: &mut Builder) -> Result<bool> {
        writeln!(
            self.output,
            "Enter the alphabet one symbol at a time. Type \"{END_KEYWORD}\" to finish:"
        )?;
        loop {
            let line = match self.prompt("> ")? {
                Some(line) => line,
                None => return Ok(false),
            };
            let token = line.trim();

            if token == END_KEYWORD {
                return Ok(true);
            }

            match builder.add_symbol(token) {
                Ok(()) => writeln!(self.output, "Symbol '{token}' added to the alphabet.")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn read_transitions(&mut self, builder: &mut Builder) -> Result<bool> {
        writeln!(self.output, "\n--- Add transitions ---")?;
        writeln!(
            self.output,
            "For each transition enter the origin state and the symbol, then the destination states one at a time."
        )?;
        writeln!(
            self.output,
            "Type \"{END_KEYWORD}\" as a destination to finish the current transition, or as the origin to finish all transitions."
        )?;

        loop {
            let origin = match self.prompt(&format!(
                "\nOrigin (or \"{END_KEYWORD}\" to finish all transitions): "
            ))? {
                Some(line) => line.trim().to_string(),
                None => return Ok(false),
            };

            if origin == END_KEYWORD {
                return Ok(true);
            }

            if let Err(err) = builder.check_state(&origin) {
                writeln!(self.output, "{err}")?;
                continue;
            }

            let token = match self.prompt(&format!(
                "Symbol for {origin} (or \"eps\"/\"epsilon\" for epsilon): "
            ))? {
                Some(line) => line,
                None => return Ok(false),
            };

            let symbol = match builder.parse_symbol(&token) {
                Ok(symbol) => symbol,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };

            writeln!(self.output, "Adding destinations for ({origin}, '{symbol}'):")?;
            loop {
                let dest = match self.prompt(&format!(
                    "  Destination for {origin},'{symbol}' (or \"{END_KEYWORD}\" for this transition): "
                ))? {
                    Some(line) => line.trim().to_string(),
                    None => return Ok(false),
                };

                if dest == END_KEYWORD {
                    break;
                }

                match builder.add_transition(&origin, symbol.clone(), &dest) {
                    Ok(()) => writeln!(self.output, "    Added: {origin} --'{symbol}'--> {dest}")?,
                    Err(err) => writeln!(self.output, "{err}")?,
                }
            }
            writeln!(self.output, "Next transition.")?;
        }
    }

    fn read_accepting_states(&mut self, builder: &mut Builder) -> Result<bool> {
        writeln!(
            self.output,
            "Enter the accepting states one at a time. Type \"{END_KEYWORD}\" to finish:"
        )?;
        loop {
            let line = match self.prompt("> ")? {
                Some(line) => line,
                None => return Ok(false),
            };
            let label = line.trim();

            if label == END_KEYWORD {
                return Ok(true);
            }

            match builder.add_accepting(label) {
                Ok(()) => writeln!(self.output, "Accepting state '{label}' added.")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    /// Evaluate strings until the quit keyword. An empty line tests the empty string. Returns
    /// false if the input ran out.
    pub fn test_strings(&mut self, automaton: &Automaton) -> Result<bool> {
        writeln!(
            self.output,
            "Enter a string to test (or \"{QUIT_KEYWORD}\" to stop). An empty line tests the empty string:"
        )?;
        loop {
            let input = match self.prompt("> ")? {
                Some(line) => line,
                None => return Ok(false),
            };

            if input == QUIT_KEYWORD {
                return Ok(true);
            }

            if self.show_trace {
                for step in automaton.trace(&input) {
                    writeln!(self.output, "  {step}")?;
                }
            }

            if automaton.accepts(&input) {
                writeln!(self.output, "String accepted")?;
            } else {
                writeln!(self.output, "String rejected")?;
            }
        }
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use std::io::Cursor;

    fn run_build(script: &str) -> (Option<Automaton>, String) {
        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new());
        let automaton = session.build().unwrap();
        let output = String::from_utf8(session.into_output()).unwrap();
        (automaton, output)
    }

    const ENDING_IN_AB: &str = "q0\nq1\nq2\nend\nq0\na\nb\nend\n\
        q0\na\nq0\nq1\nend\n\
        q0\nb\nq0\nend\n\
        q1\nb\nq2\nend\n\
        end\nq2\nend\n";

    #[test]
    fn test_build_from_script() {
        let (automaton, output) = run_build(ENDING_IN_AB);
        let automaton = automaton.unwrap();

        assert_eq!(automaton.get_states(), vec!["q0", "q1", "q2"]);
        assert_eq!(automaton.get_alphabet(), &['a', 'b']);
        assert_eq!(automaton.get_start_state(), Some("q0"));
        assert_eq!(automaton.get_accepting_states(), vec!["q2"]);
        assert!(automaton.accepts("bab"));
        assert!(!automaton.accepts("aba"));
        assert!(output.contains("Automaton built:"));
        assert!(output.contains("Added: q0 --'a'--> q1"));
    }

    #[test]
    fn test_invalid_input_is_reported_and_reasked() {
        let script = "\nq0\nq0\nend\nq7\nq0\nab\na\na\nend\n\
            q9\nq0\nz\nq0\neps\nq9\nq0\nend\nend\nq9\nq0\nq0\nend\n";
        let (automaton, output) = run_build(script);
        let automaton = automaton.unwrap();

        assert!(output.contains("Error: State name cannot be empty!"));
        assert!(output.contains("Error: State 'q0' was already added!"));
        assert!(output.contains("Error: State 'q7' does not exist!"));
        assert!(output.contains("Error: 'ab' is not a symbol!"));
        assert!(output.contains("Error: Symbol 'a' is already in the alphabet!"));
        assert!(output.contains("Error: State 'q9' does not exist!"));
        assert!(output.contains("Error: Symbol 'z' is not in the alphabet!"));
        assert!(output.contains("Error: State 'q0' is already an accepting state!"));

        assert_eq!(automaton.get_states(), vec!["q0"]);
        assert_eq!(automaton.get_alphabet(), &['a']);
        assert_eq!(automaton.get_accepting_states(), vec!["q0"]);
        assert_eq!(automaton.get_transitions().len(), 1);
        assert!(automaton.accepts(""));
    }

    #[test]
    fn test_end_requires_a_state() {
        let (automaton, output) = run_build("end\nq0\nend\nq0\nend\nend\nend\n");
        assert!(automaton.is_some());
        assert!(output.contains("Error: At least one state is required!"));
    }

    #[test]
    fn test_build_stops_at_end_of_input() {
        let (automaton, _) = run_build("q0\nq1\nend\nq0\na\n");
        assert!(automaton.is_none());
    }

    #[test]
    fn test_strings_with_trace() {
        let script = format!("{ENDING_IN_AB}ab\n\naba\nquit\n");
        let mut session = Session::new(Cursor::new(script), Vec::new()).with_trace(true);
        assert!(session.build_and_test().unwrap());
        assert!(session.last_built().is_some());

        let output = String::from_utf8(session.into_output()).unwrap();
        assert!(output.contains("'b' -> {q0, q2} accepting"));
        assert!(output.contains("'a' -> {q0, q1}"));
        assert_eq!(output.matches("String accepted").count(), 1);
        assert_eq!(output.matches("String rejected").count(), 2);
    }

    #[test]
    fn test_menu() {
        let script = "7\n1\n3\n";
        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new());
        session.run_menu().unwrap();
        let output = String::from_utf8(session.into_output()).unwrap();

        assert!(output.contains("Invalid option, please try again."));
        assert!(output.contains("String \"bab\" -> accepted (correct)"));
        assert!(output.ends_with("Exiting.\n"));
    }

    #[test]
    fn test_menu_ends_with_input() {
        let mut session = Session::new(Cursor::new(String::new()), Vec::new());
        assert!(session.run_menu().is_ok());
    }
}
