//! This crate provides the core logic of a deterministic multi-tape Turing Machine simulator.
//! It includes modules for tape storage, the transition table, machine configuration and
//! execution, and a catalog of predefined sample machines.

pub mod config;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod transitions;
pub mod types;

/// Re-exports the `MachineConfig` struct from the config module.
pub use config::MachineConfig;
/// Re-exports the `TuringMachine` and `MachineBuilder` structs from the machine module.
pub use machine::{MachineBuilder, TuringMachine};
/// Re-exports `ProgramInfo` from the programs module.
pub use programs::ProgramInfo;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the transition rule and table from the transitions module.
pub use transitions::{Transition, TransitionTable};
/// Re-exports the shared data and error types from the types module.
pub use types::{
    to_symbols, ConfigError, Movement, State, Step, StepError, Symbol, TapeContent,
    TuringMachineError, BLANK_DISPLAY, DEFAULT_MAX_STEPS,
};
