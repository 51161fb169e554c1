use std::io::{self, Write};

/// Writes one table row per executed instruction.
///
/// The table goes to its own writer (stderr from the CLI) so that program
/// output on stdout stays byte-exact.
pub struct Tracer {
    sink: Box<dyn Write + Send>,
    header_written: bool,
}

/// State captured around a single instruction.
pub struct Row<'a> {
    pub step: usize,
    pub ip: usize,
    pub ptr: usize,
    pub cell: u8,
    pub instr: char,
    pub action: &'a str,
}

impl Tracer {
    pub fn new<W: Write + Send + 'static>(sink: W) -> Self {
        Self {
            sink: Box::new(sink),
            header_written: false,
        }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub fn row(&mut self, row: Row<'_>) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.sink, "STEP | IP  | PTR | CELL | INSTR | ACTION")?;
            writeln!(
                self.sink,
                "-----+-----+-----+------+-------+------------------------------------------------"
            )?;
            self.header_written = true;
        }
        writeln!(
            self.sink,
            "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
            row.step, row.ip, row.ptr, row.cell, row.instr, row.action
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
