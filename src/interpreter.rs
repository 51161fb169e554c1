//! The fetch/execute loop.
//!
//! An [`Interpreter`] owns its program, tape, tape pointer and program
//! counter. Running walks the program counter from 0 until it passes the last
//! character:
//!
//! - `>` / `<` move the pointer; moving onto a new cell on the right grows the
//!   tape, moving left of cell 0 is an error.
//! - `+` / `-` change the current cell modulo 256.
//! - `.` writes the current cell as one raw byte.
//! - `,` reads one byte into the current cell; end of input follows
//!   [`EofPolicy`].
//! - `[` on a zero cell and `]` on a non-zero cell jump to the partner bracket
//!   (see [`crate::jump`]).
//! - Anything else is skipped.
//!
//! ```no_run
//! use tape_bf::{Interpreter, Program};
//!
//! let code = "++++++++[>++++++++<-]>+.";
//! let mut vm = Interpreter::new(Program::new(code));
//! vm.run().expect("program should run");
//! ```

use std::io::{self, ErrorKind, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{Config, EofPolicy};
use crate::error::InterpreterError;
use crate::jump::{Direction, JumpMemo};
use crate::program::Program;
use crate::tape::Tape;
use crate::trace::{Row, Tracer};

pub struct Interpreter {
    program: Program,
    tape: Tape,
    pointer: usize,
    ip: usize,
    steps: usize,
    memo: JumpMemo,
    config: Config,
    cancel_flag: Option<Arc<AtomicBool>>,
    tracer: Option<Tracer>,
}

impl Interpreter {
    /// Interpreter with default policies: fatal EOF, no step limit, no trace.
    pub fn new(program: Program) -> Self {
        Self::with_config(program, Config::default())
    }

    /// When `config.trace` is set the step table goes to stderr; use
    /// [`Interpreter::set_tracer`] to send it elsewhere.
    pub fn with_config(program: Program, config: Config) -> Self {
        let tracer = config.trace.then(Tracer::stderr);
        Self {
            memo: JumpMemo::new(program.len()),
            program,
            tape: Tape::new(),
            pointer: 0,
            ip: 0,
            steps: 0,
            config,
            cancel_flag: None,
            tracer,
        }
    }

    /// Share a flag that stops the run before the next instruction once set.
    pub fn set_cancel_flag(&mut self, flag: Arc<AtomicBool>) {
        self.cancel_flag = Some(flag);
    }

    pub fn set_tracer(&mut self, tracer: Tracer) {
        self.tracer = Some(tracer);
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn program_counter(&self) -> usize {
        self.ip
    }

    /// Instructions executed by the last run, not counting skipped characters.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Bracket scans performed so far; repeated jumps reuse earlier scans.
    pub fn scans(&self) -> usize {
        self.memo.scans()
    }

    /// Run against the process's stdin and stdout.
    pub fn run(&mut self) -> Result<(), InterpreterError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with_io(&mut stdin.lock(), &mut stdout.lock())
    }

    /// Run from the start with a fresh tape.
    ///
    /// `output` is flushed before every `,` and once more when the run ends,
    /// whether or not it ended in an error.
    pub fn run_with_io<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), InterpreterError> {
        self.tape = Tape::new();
        self.pointer = 0;
        self.ip = 0;
        self.steps = 0;

        let result = self.execute(input, output);
        let flushed = output.flush();
        let trace_flushed = match self.tracer.as_mut() {
            Some(tracer) => tracer.flush(),
            None => Ok(()),
        };

        result?;
        flushed
            .and(trace_flushed)
            .map_err(|source| InterpreterError::Io { ip: self.ip, source })
    }

    fn execute<R: Read, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<(), InterpreterError> {
        while let Some(instr) = self.program.get(self.ip) {
            if !matches!(instr, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']') {
                self.ip += 1;
                continue;
            }

            if let Some(flag) = self.cancel_flag.as_ref() {
                if flag.load(Ordering::Relaxed) {
                    return Err(InterpreterError::Interrupted);
                }
            }
            if let Some(limit) = self.config.max_steps {
                if self.steps >= limit {
                    return Err(InterpreterError::StepLimitExceeded { limit });
                }
            }

            let (ip_before, ptr_before, cell_before) = (self.ip, self.pointer, self.current());
            self.step(instr, input, output)?;

            if self.tracer.is_some() {
                let action = self.describe(instr, ip_before, ptr_before, cell_before);
                let row = Row {
                    step: self.steps,
                    ip: ip_before,
                    ptr: ptr_before,
                    cell: cell_before,
                    instr,
                    action: &action,
                };
                if let Some(tracer) = self.tracer.as_mut() {
                    tracer
                        .row(row)
                        .map_err(|source| InterpreterError::Io { ip: ip_before, source })?;
                }
            }

            self.steps += 1;
            self.ip += 1;
        }

        Ok(())
    }

    /// Apply one instruction. Jumps leave `ip` on the partner bracket.
    fn step<R: Read, W: Write>(&mut self, instr: char, input: &mut R, output: &mut W) -> Result<(), InterpreterError> {
        let ip = self.ip;
        let io_err = |source| InterpreterError::Io { ip, source };

        match instr {
            '>' => {
                self.pointer += 1;
                self.tape.cell_mut(self.pointer);
            }
            '<' => {
                if self.pointer == 0 {
                    return Err(InterpreterError::PointerUnderflow { ip });
                }
                self.pointer -= 1;
            }
            '+' => {
                let cell = self.tape.cell_mut(self.pointer);
                *cell = cell.wrapping_add(1);
            }
            '-' => {
                let cell = self.tape.cell_mut(self.pointer);
                *cell = cell.wrapping_sub(1);
            }
            '.' => {
                output.write_all(&[self.current()]).map_err(io_err)?;
            }
            ',' => {
                // Prompts written so far must be visible before blocking on input.
                output.flush().map_err(io_err)?;
                let mut buf = [0u8; 1];
                match input.read_exact(&mut buf) {
                    Ok(()) => *self.tape.cell_mut(self.pointer) = buf[0],
                    Err(e) if e.kind() == ErrorKind::UnexpectedEof => match self.config.eof {
                        EofPolicy::Error => return Err(InterpreterError::InputExhausted { ip }),
                        EofPolicy::Zero => *self.tape.cell_mut(self.pointer) = 0,
                        EofPolicy::Unchanged => {}
                    },
                    Err(e) => return Err(io_err(e)),
                }
            }
            '[' => {
                if self.current() == 0 {
                    self.ip = self.memo.resolve(&self.program, ip, Direction::Forward)?;
                }
            }
            ']' => {
                if self.current() != 0 {
                    self.ip = self.memo.resolve(&self.program, ip, Direction::Backward)?;
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn current(&self) -> u8 {
        self.tape.get(self.pointer)
    }

    fn describe(&self, instr: char, ip_before: usize, ptr_before: usize, cell_before: u8) -> String {
        let after = self.current();
        match instr {
            '>' | '<' => format!("Moved pointer head to index {}", self.pointer),
            '+' => format!("Increment cell[{ptr_before}] from {cell_before} to {after}"),
            '-' => format!("Decrement cell[{ptr_before}] from {cell_before} to {after}"),
            '.' => format!("Output byte {after}"),
            ',' => format!("Read byte -> {after}"),
            '[' if self.ip != ip_before => {
                format!("Cell is 0; jump forward to matching ']' at IP {}", self.ip)
            }
            '[' => "Enter loop (cell != 0)".to_string(),
            ']' if self.ip != ip_before => {
                format!("Cell != 0; jump back to matching '[' at IP {}", self.ip)
            }
            ']' => "Exit loop (cell is 0)".to_string(),
            _ => String::new(),
        }
    }
}
