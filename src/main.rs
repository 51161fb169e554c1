use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tape_bf::cli_util::{print_interpreter_error, print_load_error};
use tape_bf::{Config, Interpreter, InterpreterError, Program};

const PROGRAM_NAME: &str = "tape-bf";

/// Run a byte-tape program read from FILE.
///
/// `.` writes raw bytes to stdout and `,` reads bytes from stdin.
/// Policies such as end-of-input handling are read from tape-bf.toml in the
/// user's config directory.
#[derive(Parser, Debug)]
#[command(name = PROGRAM_NAME, version, about)]
struct Cli {
    /// Program file; its whole contents are the program text
    file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    ExitCode::from(run(cli))
}

fn run(cli: Cli) -> u8 {
    let program = match Program::load(&cli.file) {
        Ok(p) => p,
        Err(err) => {
            print_load_error(PROGRAM_NAME, &err);
            return 1;
        }
    };

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = cancel.clone();
    // First ctrl+c stops the run between instructions; a second one exits even
    // while blocked on input.
    if let Err(e) = ctrlc::set_handler(move || {
        if handler_flag.swap(true, Ordering::Relaxed) {
            let _ = io::stderr().flush();
            std::process::exit(130);
        }
    }) {
        eprintln!("{PROGRAM_NAME}: failed to set ctrl+c handler: {e}");
    }

    let mut vm = Interpreter::with_config(program, Config::load());
    vm.set_cancel_flag(cancel);

    match vm.run() {
        Ok(()) => 0,
        Err(InterpreterError::Interrupted) => {
            eprintln!("{PROGRAM_NAME}: {}", InterpreterError::Interrupted);
            130
        }
        Err(err) => {
            print_interpreter_error(PROGRAM_NAME, &vm.program().source(), &err);
            1
        }
    }
}
