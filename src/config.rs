//! Machine configuration: the alphabet, the state and tape counts, the initial and the halting
//! state. Every setter validates its argument and leaves the configuration untouched on error.

use std::collections::BTreeSet;

use crate::types::{ConfigError, State, Symbol};

/// The static configuration of a Turing Machine.
///
/// A fresh configuration describes a one-tape machine over an empty alphabet with two states,
/// starting in state 0 and halting in state 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    alphabet: BTreeSet<char>,
    number_of_states: usize,
    number_of_tapes: usize,
    initial_state: State,
    halting_state: State,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            alphabet: BTreeSet::new(),
            number_of_states: 2,
            number_of_tapes: 1,
            initial_state: 0,
            halting_state: 1,
        }
    }
}

impl MachineConfig {
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn number_of_states(&self) -> usize {
        self.number_of_states
    }

    pub fn number_of_tapes(&self) -> usize {
        self.number_of_tapes
    }

    pub fn initial_state(&self) -> State {
        self.initial_state
    }

    pub fn halting_state(&self) -> State {
        self.halting_state
    }

    /// The virtual error state, numerically equal to the number of states.
    pub fn error_state(&self) -> State {
        self.number_of_states
    }

    /// Replaces the alphabet. Transitions stored earlier are not re-checked.
    pub fn set_alphabet<I>(&mut self, alphabet: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.alphabet = alphabet.into_iter().collect();
    }

    /// Sets the number of states, including the halting state.
    ///
    /// Fails when fewer than two states are requested, or when the initial or halting state
    /// would fall outside the new range.
    pub fn set_number_of_states(&mut self, states: usize) -> Result<(), ConfigError> {
        if states < 2 {
            return Err(ConfigError::StateCount(states));
        }

        if let Some(state) = [self.initial_state, self.halting_state]
            .into_iter()
            .find(|&s| s >= states)
        {
            return Err(ConfigError::StateCountConflict(states, state));
        }

        self.number_of_states = states;
        Ok(())
    }

    pub fn set_number_of_tapes(&mut self, tapes: usize) -> Result<(), ConfigError> {
        if tapes < 1 {
            return Err(ConfigError::TapeCount(tapes));
        }

        self.number_of_tapes = tapes;
        Ok(())
    }

    pub fn set_initial_state(&mut self, state: State) -> Result<(), ConfigError> {
        self.check_state(state)?;
        self.initial_state = state;
        Ok(())
    }

    pub fn set_halting_state(&mut self, state: State) -> Result<(), ConfigError> {
        self.check_state(state)?;
        self.halting_state = state;
        Ok(())
    }

    /// Checks that `state` is a valid state number.
    pub fn check_state(&self, state: State) -> Result<(), ConfigError> {
        if state >= self.number_of_states {
            return Err(ConfigError::StateOutOfRange {
                state,
                states: self.number_of_states,
            });
        }
        Ok(())
    }

    /// Checks that a transition tuple carries one entry per tape.
    pub fn check_arity(&self, tuple: &'static str, found: usize) -> Result<(), ConfigError> {
        if found != self.number_of_tapes {
            return Err(ConfigError::Arity {
                tuple,
                expected: self.number_of_tapes,
                found,
            });
        }
        Ok(())
    }

    /// Checks that every symbol is blank or part of the alphabet.
    pub fn check_symbols(&self, symbols: &[Symbol]) -> Result<(), ConfigError> {
        symbols
            .iter()
            .filter_map(|s| s.as_char())
            .find(|c| !self.alphabet.contains(c))
            .map_or(Ok(()), |c| Err(ConfigError::SymbolNotInAlphabet(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MachineConfig::default();

        assert_eq!(config.number_of_states(), 2);
        assert_eq!(config.number_of_tapes(), 1);
        assert_eq!(config.initial_state(), 0);
        assert_eq!(config.halting_state(), 1);
        assert_eq!(config.error_state(), 2);
        assert!(config.alphabet().is_empty());
    }

    #[test]
    fn test_alphabet_round_trip() {
        let mut config = MachineConfig::default();
        config.set_alphabet(['a', 'b', 'c', 'd']);

        assert_eq!(config.alphabet(), &BTreeSet::from(['a', 'b', 'c', 'd']));
    }

    #[test]
    fn test_state_count_bounds() {
        let mut config = MachineConfig::default();

        assert_eq!(config.set_number_of_states(0), Err(ConfigError::StateCount(0)));
        assert_eq!(config.set_number_of_states(1), Err(ConfigError::StateCount(1)));
        assert_eq!(config.number_of_states(), 2);

        assert!(config.set_number_of_states(5).is_ok());
        assert_eq!(config.error_state(), 5);
    }

    #[test]
    fn test_halting_state_must_exist() {
        let mut config = MachineConfig::default();

        assert_eq!(
            config.set_halting_state(2),
            Err(ConfigError::StateOutOfRange { state: 2, states: 2 })
        );
        assert_eq!(config.halting_state(), 1);
    }

    #[test]
    fn test_initial_state_must_exist() {
        let mut config = MachineConfig::default();
        config.set_number_of_states(3).unwrap();

        assert!(config.set_initial_state(2).is_ok());
        assert!(config.set_initial_state(3).is_err());
        assert_eq!(config.initial_state(), 2);
    }

    #[test]
    fn test_shrinking_states_keeps_configured_states() {
        let mut config = MachineConfig::default();
        config.set_number_of_states(4).unwrap();
        config.set_halting_state(3).unwrap();

        assert_eq!(
            config.set_number_of_states(3),
            Err(ConfigError::StateCountConflict(3, 3))
        );
        assert_eq!(config.number_of_states(), 4);
    }

    #[test]
    fn test_tape_count_bounds() {
        let mut config = MachineConfig::default();

        assert_eq!(config.set_number_of_tapes(0), Err(ConfigError::TapeCount(0)));
        assert!(config.set_number_of_tapes(3).is_ok());
        assert_eq!(config.number_of_tapes(), 3);
    }

    #[test]
    fn test_check_symbols() {
        let mut config = MachineConfig::default();
        config.set_alphabet(['0', '1']);

        assert!(config
            .check_symbols(&[Symbol::Char('0'), Symbol::Blank])
            .is_ok());
        assert_eq!(
            config.check_symbols(&[Symbol::Char('1'), Symbol::Char('2')]),
            Err(ConfigError::SymbolNotInAlphabet('2'))
        );
    }
}
