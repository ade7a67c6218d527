//! A catalog of well-known sample machines. Every call constructs a fresh, independent machine.

use tracing::warn;

use crate::machine::TuringMachine;
use crate::transitions::Transition;
use crate::types::Movement::{Left, Right, Stay};
use crate::types::{to_symbols, ConfigError, Movement, State, TuringMachineError};

type Constructor = fn() -> Result<TuringMachine, ConfigError>;

static PROGRAMS: [(&str, &str, Constructor); 4] = [
    (
        "left-right",
        "Reads 'a', steps right, writes 'a' over the blank and steps back",
        left_right,
    ),
    ("eraser", "Blanks out a word over {a}", eraser),
    (
        "reverse-xor",
        "XORs a binary word with its reversal, output on tape 0",
        reverse_xor,
    ),
    (
        "busy-beaver-3",
        "Three-state, two-symbol busy beaver (14 steps, six 1s)",
        busy_beaver_3,
    ),
];

/// Summary of a catalog machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub number_of_states: usize,
    pub number_of_tapes: usize,
    pub transition_count: usize,
}

/// Lists every catalog machine in catalog order.
pub fn list() -> Vec<ProgramInfo> {
    PROGRAMS
        .iter()
        .filter_map(|&(name, description, constructor)| match constructor() {
            Ok(machine) => Some(ProgramInfo {
                name,
                description,
                number_of_states: machine.number_of_states(),
                number_of_tapes: machine.number_of_tapes(),
                transition_count: machine.transitions().len(),
            }),
            Err(e) => {
                warn!(program = name, error = %e, "failed to build program");
                None
            }
        })
        .collect()
}

/// Lists the names of the catalog machines.
pub fn names() -> Vec<&'static str> {
    PROGRAMS.iter().map(|&(name, _, _)| name).collect()
}

/// Builds the catalog machine called `name`, reset and ready for input.
pub fn build(name: &str) -> Result<TuringMachine, TuringMachineError> {
    let (_, _, constructor) = PROGRAMS
        .iter()
        .find(|(n, _, _)| *n == name)
        .ok_or_else(|| TuringMachineError::UnknownProgram(name.to_string()))?;

    Ok(constructor()?)
}

/// A rule in compact notation: `read` and `write` carry one character per tape, `_` is blank.
fn rule(from: State, read: &str, to: State, write: &str, moves: &[Movement]) -> Transition {
    Transition::new(from, to_symbols(read), to, to_symbols(write), moves.to_vec())
}

/// States {0 = halt, 1, 2}, initial state 1.
pub fn left_right() -> Result<TuringMachine, ConfigError> {
    TuringMachine::builder()
        .alphabet(['a'])
        .tapes(1)
        .states(3)
        .halting_state(0)
        .initial_state(1)
        .transitions([rule(1, "a", 2, "a", &[Right]), rule(2, "_", 0, "a", &[Left])])
        .build()
}

/// States {0 = halt, 1, 2, 3}, initial state 3. Blanks one cell, steps right and repeats until
/// it reads a blank in state 1.
pub fn eraser() -> Result<TuringMachine, ConfigError> {
    TuringMachine::builder()
        .alphabet(['a'])
        .tapes(1)
        .states(4)
        .halting_state(0)
        .initial_state(3)
        .transitions([
            rule(1, "a", 2, "_", &[Stay]),
            rule(1, "_", 0, "_", &[Stay]),
            rule(2, "_", 1, "_", &[Right]),
            rule(3, "a", 2, "_", &[Stay]),
            rule(3, "_", 2, "_", &[Stay]),
        ])
        .build()
}

/// Two tapes over {0, 1}. Copies the input reversed onto tape 1, XORs both tapes into tape 0
/// and returns both heads to the blank cell in front of the words.
pub fn reverse_xor() -> Result<TuringMachine, ConfigError> {
    TuringMachine::builder()
        .alphabet(['0', '1'])
        .tapes(2)
        .states(6)
        .halting_state(0)
        .initial_state(1)
        .transitions([
            // seek the end of the input
            rule(1, "0_", 1, "0_", &[Right, Stay]),
            rule(1, "1_", 1, "1_", &[Right, Stay]),
            rule(1, "__", 2, "__", &[Left, Stay]),
            // copy the input backwards onto tape 1
            rule(2, "0_", 2, "00", &[Left, Right]),
            rule(2, "1_", 2, "11", &[Left, Right]),
            rule(2, "__", 3, "__", &[Stay, Left]),
            // rewind tape 1
            rule(3, "_0", 3, "_0", &[Stay, Left]),
            rule(3, "_1", 3, "_1", &[Stay, Left]),
            rule(3, "__", 4, "__", &[Right, Right]),
            // xor into tape 0
            rule(4, "00", 4, "00", &[Right, Right]),
            rule(4, "10", 4, "10", &[Right, Right]),
            rule(4, "01", 4, "11", &[Right, Right]),
            rule(4, "11", 4, "01", &[Right, Right]),
            rule(4, "__", 5, "__", &[Left, Left]),
            // rewind both tapes and halt
            rule(5, "00", 5, "00", &[Left, Left]),
            rule(5, "10", 5, "10", &[Left, Left]),
            rule(5, "01", 5, "01", &[Left, Left]),
            rule(5, "11", 5, "11", &[Left, Left]),
            rule(5, "__", 0, "__", &[Stay, Stay]),
        ])
        .build()
}

/// States {0 = halt, 1 = A, 2 = B, 3 = C}; the blank plays the role of `0`.
pub fn busy_beaver_3() -> Result<TuringMachine, ConfigError> {
    TuringMachine::builder()
        .alphabet(['1'])
        .tapes(1)
        .states(4)
        .halting_state(0)
        .initial_state(1)
        .transitions([
            rule(1, "_", 2, "1", &[Right]),
            rule(1, "1", 0, "1", &[Right]),
            rule(2, "_", 3, "_", &[Right]),
            rule(2, "1", 2, "1", &[Right]),
            rule(3, "_", 3, "1", &[Left]),
            rule(3, "1", 1, "1", &[Left]),
        ])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Step, TapeContent};

    #[test]
    fn test_all_programs_build() {
        let programs = list();

        assert_eq!(programs.len(), PROGRAMS.len());
        assert_eq!(names(), vec!["left-right", "eraser", "reverse-xor", "busy-beaver-3"]);
    }

    #[test]
    fn test_program_info() {
        let info = list()
            .into_iter()
            .find(|p| p.name == "reverse-xor")
            .unwrap();

        assert_eq!(info.number_of_states, 6);
        assert_eq!(info.number_of_tapes, 2);
        assert_eq!(info.transition_count, 19);
    }

    #[test]
    fn test_build_unknown_program() {
        assert_eq!(
            build("missing").err(),
            Some(TuringMachineError::UnknownProgram("missing".to_string()))
        );
    }

    #[test]
    fn test_builds_are_independent() {
        let mut first = build("left-right").unwrap();
        let second = build("left-right").unwrap();

        first.set_input("a");
        first.step().unwrap();

        assert_eq!(first.current_state(), 2);
        assert_eq!(second.current_state(), 1);
    }

    #[test]
    fn test_busy_beaver_3() {
        let mut machine = build("busy-beaver-3").unwrap();

        assert_eq!(machine.run(100), Ok(Step::Halt));
        assert_eq!(machine.step_count(), 14);
        assert_eq!(
            machine.tape_content(0).unwrap(),
            TapeContent::from_strs("111", Some('1'), "11")
        );
    }
}
