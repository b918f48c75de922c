use clap::{Arg, ArgAction, Command};
use color_eyre::eyre::Result;
use fasim::{demo, visualize, Session};
use log::warn;
use std::io;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Command::new("fasim")
        .version("1.0")
        .author("Nagendra Kumar Jamadagni")
        .about("Simulate deterministic and non-deterministic finite automata, with or without epsilon transitions, over input strings")
        .arg(
            Arg::new("trace")
                .short('t')
                .long("trace")
                .help("Print the set of active states after every symbol of each tested string")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("save-dot")
                .short('d')
                .long("save-dot")
                .value_name("FILE")
                .help("Save the built automaton as FILE.dot, and as FILE.jpg if Graphviz is installed")
                .value_parser(clap::value_parser!(String))
                .global(true),
        )
        .arg(
            Arg::new("visualize")
                .short('v')
                .long("visualize")
                .help("Visualize the last built automaton inside an interactive window that allows for zooming, panning and clicking of elements")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("examples").about("Run the predefined example automata"))
        .subcommand(Command::new("build").about("Build an automaton interactively and test strings against it"))
        .get_matches();

    let options = match args.subcommand() {
        Some((_, sub_args)) => sub_args,
        None => &args,
    };

    let show_trace = options.get_flag("trace");
    let save_dot = options.get_one::<String>("save-dot").cloned();
    let show_window = options.get_flag("visualize");

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout())
        .with_trace(show_trace)
        .with_save_dot(save_dot);

    match args.subcommand_name() {
        Some("examples") => {
            demo::run(&mut io::stdout())?;
            if show_window {
                warn!("--visualize only applies to automata built interactively");
            }
            return Ok(());
        }
        Some("build") => {
            session.build_and_test()?;
        }
        _ => session.run_menu()?,
    }

    if show_window {
        match session.last_built() {
            Some(automaton) => visualize(automaton)?,
            None => warn!("No automaton was built, nothing to visualize"),
        }
    }

    Ok(())
}
