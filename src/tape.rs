//! This module defines the `Tape` struct: a conceptually unbounded sequence of symbols with a
//! read/write head. Only a finite region is materialized; it grows by one blank cell whenever
//! the head would otherwise leave it.

use std::collections::VecDeque;

use tracing::trace;

use crate::types::{Movement, Symbol, TapeContent};

/// A single Turing Machine tape.
///
/// The head is always an index into the materialized storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    head: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates an all-blank tape with the head at position 0.
    pub fn new() -> Self {
        Self {
            cells: VecDeque::from([Symbol::Blank]),
            head: 0,
        }
    }

    /// Creates a tape holding `content`, see [`Tape::set_content`].
    pub fn with_content<I>(content: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut tape = Self::new();
        tape.set_content(content);
        tape
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> Symbol {
        self.cells[self.head]
    }

    /// Overwrites the cell under the head.
    pub fn write(&mut self, symbol: Symbol) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell, materializing a blank cell when it walks off either end.
    ///
    /// | a | b |   cells        |   | a | b |   after `Left` at index 0
    ///   ^                        ^
    ///
    /// Moving left from index 0 inserts the new cell in front, so the head stays at index 0
    /// while every other cell shifts up by one.
    pub fn move_head(&mut self, movement: Movement) {
        match movement {
            Movement::Left => {
                if self.head == 0 {
                    trace!("extending tape to the left");
                    self.cells.push_front(Symbol::Blank);
                } else {
                    self.head -= 1;
                }
            }
            Movement::Right => {
                if self.head + 1 == self.cells.len() {
                    trace!("extending tape to the right");
                    self.cells.push_back(Symbol::Blank);
                }
                self.head += 1;
            }
            Movement::Stay => {}
        }
    }

    /// Replaces the tape content with `content` followed by one blank guard cell and puts the
    /// head on the first cell.
    pub fn set_content<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.cells = content.into_iter().collect();
        self.cells.push_back(Symbol::Blank);
        self.head = 0;
    }

    /// Returns the trimmed view of the tape around the head. Storage is left untouched.
    pub fn snapshot(&self) -> TapeContent {
        let left = self
            .cells
            .range(..self.head)
            .skip_while(|s| s.is_blank())
            .copied()
            .collect();

        let mut right: Vec<Symbol> = self.cells.range(self.head + 1..).copied().collect();
        while right.last().is_some_and(|s| s.is_blank()) {
            right.pop();
        }

        TapeContent::new(left, self.read(), right)
    }

    /// Returns the head position within the materialized storage.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A tape always materializes at least the cell under the head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the materialized cells from left to right.
    pub fn cells(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.cells.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<Symbol> {
        s.chars().map(Symbol::Char).collect()
    }

    #[test]
    fn test_new_tape_is_blank() {
        let tape = Tape::new();

        assert_eq!(tape.read(), Symbol::Blank);
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.len(), 1);
        assert_eq!(tape.snapshot(), TapeContent::new(vec![], Symbol::Blank, vec![]));
    }

    #[test]
    fn test_set_content_appends_guard() {
        let tape = Tape::with_content(chars("ab"));

        assert_eq!(tape.head(), 0);
        assert_eq!(tape.read(), Symbol::Char('a'));
        assert_eq!(
            tape.cells().collect::<Vec<_>>(),
            vec![Symbol::Char('a'), Symbol::Char('b'), Symbol::Blank]
        );
    }

    #[test]
    fn test_set_empty_content() {
        let mut tape = Tape::with_content(chars("xyz"));
        tape.set_content(Vec::new());

        assert_eq!(tape.len(), 1);
        assert_eq!(tape.read(), Symbol::Blank);
    }

    #[test]
    fn test_write_then_read() {
        let mut tape = Tape::new();
        tape.write(Symbol::Char('a'));

        assert_eq!(tape.read(), Symbol::Char('a'));
        assert_eq!(tape.snapshot(), TapeContent::from_strs("", Some('a'), ""));
    }

    #[test]
    fn test_move_right_grows_storage() {
        let mut tape = Tape::with_content(chars("a"));

        for expected_len in 2..10 {
            tape.move_head(Movement::Right);
            assert!(tape.head() < tape.len());
            assert_eq!(tape.len(), expected_len);
            assert_eq!(tape.read(), Symbol::Blank);
        }

        let snapshot = tape.snapshot();
        assert_eq!(snapshot.left_of_head.len(), 8);
        assert_eq!(snapshot.left_of_head[0], Symbol::Char('a'));
        assert!(snapshot.left_of_head[1..].iter().all(|s| s.is_blank()));
        assert_eq!(snapshot.below_head, Symbol::Blank);
        assert!(snapshot.right_of_head.is_empty());
    }

    #[test]
    fn test_move_left_at_edge_inserts_blank() {
        let mut tape = Tape::with_content(chars("ab"));
        tape.move_head(Movement::Left);

        assert_eq!(tape.head(), 0);
        assert_eq!(tape.len(), 4);
        assert_eq!(tape.read(), Symbol::Blank);
        assert_eq!(tape.snapshot(), TapeContent::from_strs("", None, "ab"));

        tape.move_head(Movement::Right);
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.read(), Symbol::Char('a'));
    }

    #[test]
    fn test_stay_keeps_head() {
        let mut tape = Tape::with_content(chars("ab"));
        tape.move_head(Movement::Right);
        tape.move_head(Movement::Stay);

        assert_eq!(tape.head(), 1);
        assert_eq!(tape.len(), 3);
    }

    #[test]
    fn test_snapshot_keeps_inner_blanks() {
        let mut tape = Tape::new();
        tape.write(Symbol::Char('a'));
        tape.move_head(Movement::Right);
        tape.move_head(Movement::Right);
        tape.write(Symbol::Char('b'));
        tape.move_head(Movement::Right);
        tape.move_head(Movement::Right);
        tape.write(Symbol::Char('c'));
        for _ in 0..2 {
            tape.move_head(Movement::Left);
        }

        assert_eq!(tape.snapshot(), TapeContent::from_strs("a_", Some('b'), "_c"));
    }

    #[test]
    fn test_snapshot_reconstructs_written_region() {
        let moves = [Movement::Left, Movement::Right, Movement::Stay];
        let alphabet = [Symbol::Blank, Symbol::Char('0'), Symbol::Char('1')];
        let mut tape = Tape::new();
        let mut seed: u32 = 7;

        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let r = (seed >> 16) as usize;
            tape.write(alphabet[r % alphabet.len()]);
            tape.move_head(moves[(r / 3) % moves.len()]);

            let snapshot = tape.snapshot();
            let mut composed = snapshot.left_of_head.clone();
            composed.push(snapshot.below_head);
            composed.extend(snapshot.right_of_head.iter().copied());

            assert_eq!(trim(&composed), trim(&tape.cells().collect::<Vec<_>>()));
            assert!(tape.head() < tape.len());
        }
    }

    fn trim(symbols: &[Symbol]) -> &[Symbol] {
        let start = symbols.iter().position(|s| !s.is_blank());
        let end = symbols.iter().rposition(|s| !s.is_blank());
        match (start, end) {
            (Some(start), Some(end)) => &symbols[start..=end],
            _ => &[],
        }
    }
}
