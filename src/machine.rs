//! This module defines the `TuringMachine` struct, which simulates a deterministic multi-tape
//! Turing Machine. It owns the configuration, the tapes and the transition table, and executes
//! single derivation steps on them.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::MachineConfig;
use crate::tape::Tape;
use crate::transitions::{Transition, TransitionTable};
use crate::types::{ConfigError, Movement, State, Step, StepError, Symbol, TapeContent};

/// Represents a deterministic multi-tape Turing Machine.
///
/// Tape 0 is the input tape. The machine is in one of the configured states
/// `0..number_of_states`, or in the error state whose number equals `number_of_states`.
/// The error state is reached only when no transition matches during [`TuringMachine::step`].
#[derive(Debug, Clone)]
pub struct TuringMachine {
    config: MachineConfig,
    state: State,
    tapes: Vec<Tape>,
    transitions: TransitionTable,
    step_count: usize,
}

impl Default for TuringMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl TuringMachine {
    /// Creates a machine with the default [`MachineConfig`] and no transitions.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Creates a machine from an existing configuration, ready to run from its initial state.
    pub fn with_config(config: MachineConfig) -> Self {
        let tapes = vec![Tape::new(); config.number_of_tapes()];
        Self {
            state: config.initial_state(),
            config,
            tapes,
            transitions: TransitionTable::new(),
            step_count: 0,
        }
    }

    /// Returns a builder for assembling a machine in one expression.
    pub fn builder() -> MachineBuilder {
        MachineBuilder::default()
    }

    /// Replaces the input alphabet.
    ///
    /// Transitions stored before the call are not re-validated against the new alphabet.
    pub fn set_alphabet<I>(&mut self, alphabet: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.config.set_alphabet(alphabet);
    }

    /// Sets the number of states, including the halting state.
    ///
    /// Fails when fewer than two states are requested, or when the initial state, the halting
    /// state or a stored transition refers to a state outside the new range.
    pub fn set_number_of_states(&mut self, states: usize) -> Result<(), ConfigError> {
        if let Some(state) = self.transitions.max_state().filter(|&s| s >= states) {
            return Err(ConfigError::StateCountConflict(states, state));
        }

        let errored = self.is_error();
        self.config.set_number_of_states(states).inspect_err(|e| {
            debug!(error = %e, "rejected state count");
        })?;
        if errored {
            self.state = self.config.error_state();
        }
        Ok(())
    }

    /// Sets the number of tapes and replaces every tape with a fresh blank one.
    ///
    /// Fails when `tapes` is zero, or when stored transitions were written for a different
    /// number of tapes.
    pub fn set_number_of_tapes(&mut self, tapes: usize) -> Result<(), ConfigError> {
        if let Some(arity) = self.transitions.arity().filter(|&n| n != tapes) {
            return Err(ConfigError::TapeCountConflict(tapes, arity));
        }

        self.config.set_number_of_tapes(tapes)?;
        self.tapes = vec![Tape::new(); tapes];
        Ok(())
    }

    /// Sets the initial state and moves the machine into it.
    pub fn set_initial_state(&mut self, state: State) -> Result<(), ConfigError> {
        self.config.set_initial_state(state)?;
        self.state = state;
        Ok(())
    }

    /// Sets the (accepting) halting state. A state with outgoing transitions cannot halt.
    pub fn set_halting_state(&mut self, state: State) -> Result<(), ConfigError> {
        if self.transitions.iter().any(|t| t.from == state) {
            return Err(ConfigError::TransitionFromHalting(state));
        }

        self.config.set_halting_state(state)
    }

    /// Adds a transition to a single-tape machine.
    ///
    /// # Arguments
    ///
    /// * `from` - The state in which the transition applies.
    /// * `read` - The symbol that must be under the head.
    /// * `to` - The state entered after the transition.
    /// * `write` - The symbol written under the head.
    /// * `movement` - The head movement after writing.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the transition was stored.
    /// * `Err(ConfigError)` if it is invalid, non-deterministic, or the machine has more than
    ///   one tape.
    pub fn add_transition(
        &mut self,
        from: State,
        read: impl Into<Symbol>,
        to: State,
        write: impl Into<Symbol>,
        movement: Movement,
    ) -> Result<(), ConfigError> {
        self.insert(Transition::single(
            from,
            read.into(),
            to,
            write.into(),
            movement,
        ))
    }

    /// Adds a transition reading, writing and moving on every tape. Index `i` of each slice
    /// belongs to tape `i`.
    pub fn add_multi_tape_transition(
        &mut self,
        from: State,
        read: &[Symbol],
        to: State,
        write: &[Symbol],
        moves: &[Movement],
    ) -> Result<(), ConfigError> {
        self.insert(Transition::new(
            from,
            read.to_vec(),
            to,
            write.to_vec(),
            moves.to_vec(),
        ))
    }

    /// Validates and stores a prepared transition.
    pub fn insert(&mut self, transition: Transition) -> Result<(), ConfigError> {
        self.transitions
            .insert(transition, &self.config)
            .inspect_err(|e| debug!(error = %e, "rejected transition"))
    }

    /// Resets the machine for a fresh run: every tape becomes blank with its head at position
    /// 0 and the machine re-enters the initial state. Configuration and transitions are kept.
    pub fn reset(&mut self) {
        self.tapes = vec![Tape::new(); self.config.number_of_tapes()];
        self.state = self.config.initial_state();
        self.step_count = 0;
    }

    /// Sets the content of the input tape and puts its head on the first input symbol.
    ///
    /// `"abc"` yields the tape `...abc...` with the head over `a`. Other tapes are unaffected.
    pub fn set_input(&mut self, content: &str) {
        self.tapes[0].set_content(content.chars().map(Symbol::Char));
    }

    /// Sets the content of any tape, with the same head placement as [`TuringMachine::set_input`].
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the tape was set.
    /// * `Err(ConfigError::TapeIndex)` if the tape index is out of bounds.
    pub fn set_tape<I>(&mut self, index: usize, content: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let tapes = self.tapes.len();
        let tape = self
            .tapes
            .get_mut(index)
            .ok_or(ConfigError::TapeIndex { index, tapes })?;

        tape.set_content(content);
        Ok(())
    }

    /// Executes a single derivation step.
    ///
    /// Reads the symbol under every head and looks up the transition for the current state.
    /// When none matches, the machine enters the error state and no tape is touched. Otherwise
    /// every tape, in index order, is written at its head and then has its head moved.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if a transition was applied and the machine is still running.
    /// * `Ok(Step::Halt)` if a transition led into the halting state.
    /// * `Ok(Step::Reject)` if no transition matched.
    /// * `Err(StepError)` if the machine was already halted or in the error state.
    pub fn step(&mut self) -> Result<Step, StepError> {
        self.ensure_running()?;

        let read = self.symbols();
        let Some(transition) = self.transitions.lookup(self.state, &read) else {
            debug!(state = self.state, ?read, "no transition matches, entering error state");
            self.state = self.config.error_state();
            return Ok(Step::Reject);
        };

        debug!(step = self.step_count, %transition, "applying transition");

        for ((tape, &symbol), &movement) in self
            .tapes
            .iter_mut()
            .zip(&transition.write)
            .zip(&transition.moves)
        {
            tape.write(symbol);
            tape.move_head(movement);
        }

        self.state = transition.to;
        self.step_count += 1;

        if self.is_halting() {
            Ok(Step::Halt)
        } else {
            Ok(Step::Continue)
        }
    }

    /// Runs the machine until it halts, enters the error state or `max_steps` steps were taken.
    ///
    /// Returns `Step::Continue` when the step bound was reached first.
    pub fn run(&mut self, max_steps: usize) -> Result<Step, StepError> {
        self.ensure_running()?;

        for _ in 0..max_steps {
            match self.step()? {
                Step::Continue => continue,
                stopped => return Ok(stopped),
            }
        }

        debug!(max_steps, state = self.state, "step bound reached");
        Ok(Step::Continue)
    }

    fn ensure_running(&self) -> Result<(), StepError> {
        if self.is_halting() {
            return Err(StepError::Halted);
        }
        if self.is_error() {
            return Err(StepError::Errored);
        }
        Ok(())
    }

    /// Checks if the machine is in its halting state.
    pub fn is_halting(&self) -> bool {
        self.state == self.config.halting_state()
    }

    /// Checks if the machine is in the error state.
    pub fn is_error(&self) -> bool {
        self.state >= self.config.number_of_states()
    }

    /// Returns the current state; equal to `number_of_states()` in the error state.
    pub fn current_state(&self) -> State {
        self.state
    }

    /// Returns the number of transitions applied since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the symbols currently under each tape's head, in tape order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.tapes.iter().map(Tape::read).collect()
    }

    /// Returns the transition the next step would apply, if any.
    pub fn transition(&self) -> Option<&Transition> {
        if self.is_halting() || self.is_error() {
            return None;
        }
        self.transitions.lookup(self.state, &self.symbols())
    }

    /// Returns the trimmed content of one tape.
    ///
    /// `None` if the machine is in the error state or the tape does not exist.
    pub fn tape_content(&self, index: usize) -> Option<TapeContent> {
        if self.is_error() {
            return None;
        }
        self.tapes.get(index).map(Tape::snapshot)
    }

    /// Returns the trimmed content of every tape in tape order, or `None` in the error state.
    pub fn tape_contents(&self) -> Option<Vec<TapeContent>> {
        if self.is_error() {
            return None;
        }
        Some(self.tapes.iter().map(Tape::snapshot).collect())
    }

    pub fn tapes(&self) -> &[Tape] {
        &self.tapes
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        self.config.alphabet()
    }

    pub fn number_of_states(&self) -> usize {
        self.config.number_of_states()
    }

    pub fn number_of_tapes(&self) -> usize {
        self.config.number_of_tapes()
    }

    pub fn initial_state(&self) -> State {
        self.config.initial_state()
    }

    pub fn halting_state(&self) -> State {
        self.config.halting_state()
    }
}

/// Assembles a [`TuringMachine`] from chained configuration calls.
///
/// Calls are applied in order; the first rejected call is reported by [`MachineBuilder::build`]
/// and every later call is skipped.
#[derive(Debug, Default)]
pub struct MachineBuilder {
    machine: TuringMachine,
    error: Option<ConfigError>,
}

impl MachineBuilder {
    fn apply<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut TuringMachine) -> Result<(), ConfigError>,
    {
        if self.error.is_none() {
            self.error = f(&mut self.machine).err();
        }
        self
    }

    pub fn alphabet<I>(self, alphabet: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.apply(|m| {
            m.set_alphabet(alphabet);
            Ok(())
        })
    }

    pub fn states(self, states: usize) -> Self {
        self.apply(|m| m.set_number_of_states(states))
    }

    pub fn tapes(self, tapes: usize) -> Self {
        self.apply(|m| m.set_number_of_tapes(tapes))
    }

    pub fn initial_state(self, state: State) -> Self {
        self.apply(|m| m.set_initial_state(state))
    }

    pub fn halting_state(self, state: State) -> Self {
        self.apply(|m| m.set_halting_state(state))
    }

    pub fn transition(self, transition: Transition) -> Self {
        self.apply(|m| m.insert(transition))
    }

    pub fn transitions<I>(self, transitions: I) -> Self
    where
        I: IntoIterator<Item = Transition>,
    {
        self.apply(|m| transitions.into_iter().try_for_each(|t| m.insert(t)))
    }

    /// Finishes the machine, reset and ready to receive input.
    pub fn build(self) -> Result<TuringMachine, ConfigError> {
        match self.error {
            Some(error) => Err(error),
            None => {
                let mut machine = self.machine;
                machine.reset();
                Ok(machine)
            }
        }
    }
}
