//! This module defines the core data structures and types shared by the tape, the transition
//! table and the machine: symbols, head movements, tape snapshots, step outcomes and errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A machine state number. Valid states lie in `0..number_of_states`.
pub type State = usize;

/// The character used when rendering a blank cell.
pub const BLANK_DISPLAY: char = '_';
/// The step bound used by front ends when none is given.
pub const DEFAULT_MAX_STEPS: usize = 10000;

/// The content of a single tape cell.
///
/// `Blank` is the tape fill value and is never a member of the alphabet; every other cell
/// holds a `Char` that the alphabet is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Symbol {
    /// The blank symbol filling every unwritten cell.
    #[default]
    Blank,
    /// A symbol of the alphabet.
    Char(char),
}

impl Symbol {
    /// Returns the character held by this symbol, or `None` for a blank cell.
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Blank => None,
            Symbol::Char(c) => Some(c),
        }
    }

    pub fn is_blank(self) -> bool {
        self == Symbol::Blank
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl From<Option<char>> for Symbol {
    fn from(c: Option<char>) -> Self {
        c.map_or(Symbol::Blank, Symbol::Char)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Blank => write!(f, "{}", BLANK_DISPLAY),
            Symbol::Char(c) => write!(f, "{}", c),
        }
    }
}

/// Represents the possible movements of a Turing Machine head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Movement::Left => 'L',
            Movement::Right => 'R',
            Movement::Stay => 'S',
        };
        write!(f, "{}", c)
    }
}

/// A trimmed view of one tape around its head.
///
/// Leading blanks of `left_of_head` and trailing blanks of `right_of_head` are stripped;
/// blanks between written cells are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapeContent {
    /// Every symbol left of the head, in tape order.
    pub left_of_head: Vec<Symbol>,
    /// The symbol under the head.
    pub below_head: Symbol,
    /// Every symbol right of the head, in tape order.
    pub right_of_head: Vec<Symbol>,
}

impl TapeContent {
    pub fn new(left_of_head: Vec<Symbol>, below_head: Symbol, right_of_head: Vec<Symbol>) -> Self {
        Self {
            left_of_head,
            below_head,
            right_of_head,
        }
    }

    /// Convenience constructor from string slices, mapping [`BLANK_DISPLAY`] to a blank cell.
    pub fn from_strs(left: &str, below: Option<char>, right: &str) -> Self {
        Self::new(to_symbols(left), below.into(), to_symbols(right))
    }
}

/// Converts text into symbols, mapping [`BLANK_DISPLAY`] to a blank cell.
pub fn to_symbols(s: &str) -> Vec<Symbol> {
    s.chars()
        .map(|c| {
            if c == BLANK_DISPLAY {
                Symbol::Blank
            } else {
                Symbol::Char(c)
            }
        })
        .collect()
}

impl fmt::Display for TapeContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.left_of_head {
            write!(f, "{}", symbol)?;
        }
        write!(f, "[{}]", self.below_head)?;
        for symbol in &self.right_of_head {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// Represents the configuration reached after a Turing Machine execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Step {
    /// A transition was applied and the machine can keep running.
    Continue,
    /// The machine reached its halting state.
    Halt,
    /// No transition matched; the machine is in the error state.
    Reject,
}

/// Errors raised when a configuration call is rejected. The previous configuration is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A machine needs at least one working state and the halting state.
    #[error("Invalid number of states: {0} (at least 2 required)")]
    StateCount(usize),
    /// A machine needs at least the input tape.
    #[error("Invalid number of tapes: {0} (at least 1 required)")]
    TapeCount(usize),
    #[error("State {state} is out of range (machine has {states} states)")]
    StateOutOfRange { state: State, states: usize },
    #[error("Transitions may not leave the halting state {0}")]
    TransitionFromHalting(State),
    /// A read, write or move tuple does not have one entry per tape.
    #[error("Transition {tuple} tuple has {found} entries, expected {expected}")]
    Arity {
        tuple: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Symbol '{0}' is not part of the alphabet")]
    SymbolNotInAlphabet(char),
    #[error("Transition for state {state} reading {read:?} already exists")]
    NonDeterministic { state: State, read: Vec<Symbol> },
    #[error("Tape index {index} is out of bounds (machine has {tapes} tapes)")]
    TapeIndex { index: usize, tapes: usize },
    /// Shrinking the state count would orphan a configured or referenced state.
    #[error("Cannot reduce the number of states to {0}: state {1} is still in use")]
    StateCountConflict(usize, State),
    /// The tape count cannot change once transitions of another arity are stored.
    #[error("Cannot change the number of tapes to {0}: transitions for {1} tapes exist")]
    TapeCountConflict(usize, usize),
}

/// Errors raised when `step` is called on a machine that has already stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("Machine is already in the halting state")]
    Halted,
    #[error("Machine is already in the error state")]
    Errored,
}

/// Represents the errors front ends deal with when driving a Turing Machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// A configuration call was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The caller drove a machine that had already stopped.
    #[error("Execution error: {0}")]
    Step(#[from] StepError),
    /// No catalog program carries the requested name.
    #[error("Program '{0}' not found")]
    UnknownProgram(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_serialization() {
        let left_json = serde_json::to_string(&Movement::Left).unwrap();
        let stay_json = serde_json::to_string(&Movement::Stay).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(stay_json, "\"Stay\"");

        let left: Movement = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, Movement::Left);
    }

    #[test]
    fn test_symbol_conversions() {
        assert_eq!(Symbol::from('a'), Symbol::Char('a'));
        assert_eq!(Symbol::from(None), Symbol::Blank);
        assert_eq!(Symbol::Char('x').as_char(), Some('x'));
        assert_eq!(Symbol::Blank.as_char(), None);
        assert!(Symbol::default().is_blank());
    }

    #[test]
    fn test_to_symbols_maps_blank() {
        assert_eq!(
            to_symbols("1_0"),
            vec![Symbol::Char('1'), Symbol::Blank, Symbol::Char('0')]
        );
        assert!(to_symbols("").is_empty());
    }

    #[test]
    fn test_tape_content_display() {
        let content = TapeContent::from_strs("a_b", None, "c");

        assert_eq!(content.left_of_head[1], Symbol::Blank);
        assert_eq!(content.to_string(), "a_b[_]c");
    }

    #[test]
    fn test_tape_content_json() {
        let content = TapeContent::from_strs("", Some('a'), "");
        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["below_head"], serde_json::json!({ "Char": "a" }));
        assert_eq!(json["left_of_head"], serde_json::json!([]));
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::from(ConfigError::TransitionFromHalting(0));

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Configuration error"));
        assert!(error_msg.contains("halting state 0"));

        let error = TuringMachineError::from(StepError::Errored);
        assert!(error.to_string().contains("error state"));
    }
}
