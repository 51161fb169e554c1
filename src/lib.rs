//! A small interpreter for the eight-symbol byte-tape language.
//!
//! Features and behaviors:
//! - The tape starts as a single zero cell and grows to the right as the
//!   pointer moves onto new cells. Moving left of cell 0 returns an error.
//! - Cells are bytes; `+` and `-` wrap modulo 256.
//! - `.` writes the current cell as one raw byte (no newline).
//! - `,` reads one byte; what happens at end of input is set by [`EofPolicy`]
//!   (an error by default).
//! - Loop brackets are matched when a jump is taken, by scanning the program.
//!   A bracket that never needs to jump is never checked.
//! - Characters outside `><+-.,[]` are skipped.
//!
//! Quick start:
//!
//! ```no_run
//! use tape_bf::{Interpreter, Program};
//!
//! let code = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
//! let mut vm = Interpreter::new(Program::new(code));
//! vm.run().expect("program should run");
//! ```

pub mod cli_util;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod jump;
pub mod program;
pub mod tape;
pub mod trace;

pub use config::{Config, EofPolicy};
pub use error::{BracketKind, InterpreterError, LoadError};
pub use interpreter::Interpreter;
pub use program::Program;
pub use tape::Tape;
