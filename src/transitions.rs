//! This module provides the deterministic transition table: a mapping from a state and the
//! symbols read on every tape to the next state, the symbols to write and the head movements.

use std::collections::HashMap;
use std::fmt;

use crate::config::MachineConfig;
use crate::types::{ConfigError, Movement, State, Symbol};

/// A single transition rule of a multi-tape Turing Machine.
///
/// Index `i` of `read`, `write` and `moves` refers to tape `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The state in which the rule applies.
    pub from: State,
    /// The symbols that must be under each head.
    pub read: Vec<Symbol>,
    /// The state the machine transitions to.
    pub to: State,
    /// The symbols written to each tape.
    pub write: Vec<Symbol>,
    /// The movement of each head after writing.
    pub moves: Vec<Movement>,
}

impl Transition {
    pub fn new(
        from: State,
        read: Vec<Symbol>,
        to: State,
        write: Vec<Symbol>,
        moves: Vec<Movement>,
    ) -> Self {
        Self {
            from,
            read,
            to,
            write,
            moves,
        }
    }

    /// Builds a single-tape rule.
    pub fn single(from: State, read: Symbol, to: State, write: Symbol, movement: Movement) -> Self {
        Self::new(from, vec![read], to, vec![write], vec![movement])
    }

    fn key(&self) -> TransitionKey {
        TransitionKey {
            state: self.from,
            read: self.read.clone(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {}, {})",
            self.from,
            concat(&self.read),
            self.to,
            concat(&self.write),
            concat(&self.moves),
        )
    }
}

fn concat<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(|item| item.to_string()).collect()
}

/// The lookup key of a transition: the state and the exact symbols read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TransitionKey {
    state: State,
    read: Vec<Symbol>,
}

/// Stores transitions in insertion order and looks them up by exact key.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rules: Vec<Transition>,
    index: HashMap<TransitionKey, usize>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `transition` against `config` and stores it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the transition was stored.
    /// * `Err(ConfigError)` if it leaves the halting state, references an unknown state, has
    ///   tuples of the wrong length, uses a symbol outside the alphabet, or shares its
    ///   `(from, read)` key with a stored transition. The table is unchanged in that case.
    pub fn insert(
        &mut self,
        transition: Transition,
        config: &MachineConfig,
    ) -> Result<(), ConfigError> {
        if transition.from == config.halting_state() {
            return Err(ConfigError::TransitionFromHalting(transition.from));
        }
        config.check_state(transition.from)?;
        config.check_state(transition.to)?;

        config.check_arity("read", transition.read.len())?;
        config.check_arity("write", transition.write.len())?;
        config.check_arity("move", transition.moves.len())?;

        config.check_symbols(&transition.read)?;
        config.check_symbols(&transition.write)?;

        let key = transition.key();
        if self.index.contains_key(&key) {
            return Err(ConfigError::NonDeterministic {
                state: key.state,
                read: key.read,
            });
        }

        self.index.insert(key, self.rules.len());
        self.rules.push(transition);
        Ok(())
    }

    /// Finds the transition for `state` reading exactly `read`. A miss is not an error.
    pub fn lookup(&self, state: State, read: &[Symbol]) -> Option<&Transition> {
        let key = TransitionKey {
            state,
            read: read.to_vec(),
        };
        self.index.get(&key).map(|&i| &self.rules[i])
    }

    /// Iterates over the transitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the highest state any stored transition refers to.
    pub fn max_state(&self) -> Option<State> {
        self.rules.iter().map(|t| t.from.max(t.to)).max()
    }

    /// Returns the tape count stored transitions were written for.
    pub fn arity(&self) -> Option<usize> {
        self.rules.first().map(|t| t.read.len())
    }
}
