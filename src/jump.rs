//! Loop bracket resolution.
//!
//! Brackets are matched when they are evaluated, by walking the program
//! counter across the loop body while counting nesting depth. A bracket is
//! only checked when a jump from it is actually taken, so a program whose
//! unbalanced bracket is never jumped from runs to completion.
//!
//! Each completed scan is remembered in a [`JumpMemo`]. Later jumps from the
//! same bracket, or from its partner, reuse the recorded position. The memo is
//! filled only by successful scans, so it never changes where a jump lands or
//! which programs fail.

use crate::error::{BracketKind, InterpreterError};
use crate::program::Program;

/// Which way a scan walks the program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    fn kind(self) -> BracketKind {
        match self {
            Direction::Forward => BracketKind::Open,
            Direction::Backward => BracketKind::Close,
        }
    }
}

/// Walk from the bracket at `start` to its partner.
///
/// Depth starts at 1. Every `[` adds the direction step and every `]`
/// subtracts it, so nesting is counted the same way whichever way the scan
/// runs. Returns the partner's index; the caller's normal advance-by-one then
/// steps past it.
pub fn scan(program: &Program, start: usize, direction: Direction) -> Result<usize, InterpreterError> {
    let step = direction.step();
    let unmatched = || InterpreterError::UnmatchedBracket {
        ip: start,
        kind: direction.kind(),
    };

    let mut ip = start;
    let mut depth: isize = 1;
    while depth > 0 {
        ip = ip.checked_add_signed(step).ok_or_else(unmatched)?;
        match program.get(ip).ok_or_else(unmatched)? {
            '[' => depth += step,
            ']' => depth -= step,
            _ => {}
        }
    }
    Ok(ip)
}

/// Bracket pairs already matched by a completed scan.
#[derive(Debug, Clone)]
pub struct JumpMemo {
    // partner[i] holds the matching index for a bracket at i once known.
    partner: Vec<Option<usize>>,
    scans: usize,
}

impl JumpMemo {
    pub fn new(program_len: usize) -> Self {
        Self {
            partner: vec![None; program_len],
            scans: 0,
        }
    }

    /// Partner of the bracket at `start`, scanning only the first time.
    pub fn resolve(
        &mut self,
        program: &Program,
        start: usize,
        direction: Direction,
    ) -> Result<usize, InterpreterError> {
        if let Some(target) = self.partner.get(start).copied().flatten() {
            return Ok(target);
        }

        let target = scan(program, start, direction)?;
        self.scans += 1;
        self.partner[start] = Some(target);
        self.partner[target] = Some(start);
        Ok(target)
    }

    /// Number of scans actually performed.
    pub fn scans(&self) -> usize {
        self.scans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_scan_skips_nested_loops() {
        let program = Program::new("[[[]]]+");
        assert_eq!(scan(&program, 0, Direction::Forward).unwrap(), 5);
        assert_eq!(scan(&program, 1, Direction::Forward).unwrap(), 4);
    }

    #[test]
    fn backward_scan_lands_on_open_bracket() {
        let program = Program::new("+[>[-]<-]");
        assert_eq!(scan(&program, 8, Direction::Backward).unwrap(), 1);
        assert_eq!(scan(&program, 5, Direction::Backward).unwrap(), 3);
    }

    #[test]
    fn forward_scan_off_the_end_reports_open_bracket() {
        let program = Program::new("+[[]");
        let err = scan(&program, 1, Direction::Forward).unwrap_err();
        assert!(matches!(
            err,
            InterpreterError::UnmatchedBracket { ip: 1, kind: BracketKind::Open }
        ));
    }

    #[test]
    fn backward_scan_off_the_start_reports_close_bracket() {
        let program = Program::new("[]]");
        let err = scan(&program, 2, Direction::Backward).unwrap_err();
        assert!(matches!(
            err,
            InterpreterError::UnmatchedBracket { ip: 2, kind: BracketKind::Close }
        ));
    }

    #[test]
    fn memo_records_both_sides_of_a_pair() {
        let program = Program::new("[a[b]c]");
        let mut memo = JumpMemo::new(program.len());
        assert_eq!(memo.resolve(&program, 0, Direction::Forward).unwrap(), 6);
        assert_eq!(memo.resolve(&program, 6, Direction::Backward).unwrap(), 0);
        assert_eq!(memo.resolve(&program, 0, Direction::Forward).unwrap(), 6);
        assert_eq!(memo.scans(), 1);
    }

    #[test]
    fn failed_scan_is_not_remembered() {
        let program = Program::new("[");
        let mut memo = JumpMemo::new(program.len());
        assert!(memo.resolve(&program, 0, Direction::Forward).is_err());
        assert!(memo.resolve(&program, 0, Direction::Forward).is_err());
        assert_eq!(memo.scans(), 0);
    }
}
