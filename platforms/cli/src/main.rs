mod logging;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use turing_tapes::{
    programs, to_symbols, Step, TapeContent, TuringMachine, TuringMachineError, DEFAULT_MAX_STEPS,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The catalog machine to execute
    #[clap(short, long, required_unless_present = "list")]
    machine: Option<String>,

    /// The input of each tape, in tape order; `_` stands for a blank cell
    #[clap(short, long)]
    input: Vec<String>,

    /// Stop after this many steps
    #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the final report as JSON
    #[clap(long)]
    json: bool,

    /// Print the transition table before running
    #[clap(long)]
    rules: bool,

    /// List the catalog machines and exit
    #[clap(short, long)]
    list: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    machine: &'a str,
    outcome: Step,
    state: usize,
    steps: usize,
    tapes: Option<Vec<TapeContent>>,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, TuringMachineError> {
    if cli.list {
        for info in programs::list() {
            println!(
                "{:<16} {} ({} states, {} tapes, {} transitions)",
                info.name,
                info.description,
                info.number_of_states,
                info.number_of_tapes,
                info.transition_count
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let name = cli.machine.as_deref().unwrap_or_default();
    let mut machine = programs::build(name)?;
    for (i, input) in cli.input.iter().enumerate() {
        machine.set_tape(i, to_symbols(input))?;
    }
    info!(machine = name, inputs = cli.input.len(), "starting");

    if cli.rules {
        for transition in machine.transitions().iter() {
            println!("{}", transition);
        }
        println!();
    }

    let outcome = if cli.debug {
        print_state(&machine);
        let mut outcome = Step::Continue;
        for _ in 0..cli.max_steps {
            outcome = machine.step()?;
            print_state(&machine);
            if outcome != Step::Continue {
                break;
            }
        }
        outcome
    } else {
        machine.run(cli.max_steps)?
    };

    if cli.json {
        let report = Report {
            machine: name,
            outcome,
            state: machine.current_state(),
            steps: machine.step_count(),
            tapes: machine.tape_contents(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize report: {}", e),
        }
    } else {
        match outcome {
            Step::Halt => println!("Machine halted after {} steps.", machine.step_count()),
            Step::Reject => println!("Machine entered the error state."),
            Step::Continue => println!("Step limit of {} reached.", cli.max_steps),
        }
        if let Some(contents) = machine.tape_contents() {
            for content in contents {
                println!("{}", content);
            }
        }
    }

    Ok(match outcome {
        Step::Halt => ExitCode::SUCCESS,
        Step::Reject | Step::Continue => ExitCode::FAILURE,
    })
}

fn print_state(machine: &TuringMachine) {
    let tapes = machine
        .tape_contents()
        .map(|contents| {
            contents
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    println!(
        "Step: {}, State: {}, Tapes: [{}]",
        machine.step_count(),
        machine.current_state(),
        tapes
    );
}
