use std::io::{self, IsTerminal, Write};

use nu_ansi_term::Color;

use crate::{InterpreterError, LoadError};

// Characters of source shown on each side of the failing instruction.
const WINDOW_CHARS: usize = 32;

/// Print an interpreter error. Errors tied to an instruction also get a
/// source window with a caret under that instruction.
pub fn print_interpreter_error(program: &str, code: &str, err: &InterpreterError) {
    let headline = format!("{program}: {}", paint_error(&err.to_string()));
    match err.ip() {
        Some(ip) => print_error_with_context(&headline, code, ip),
        None => eprintln!("{headline}"),
    }
    let _ = io::stderr().flush();
}

pub fn print_load_error(program: &str, err: &LoadError) {
    eprintln!("{program}: {}", paint_error(&err.to_string()));
    let _ = io::stderr().flush();
}

fn paint_error(msg: &str) -> String {
    if io::stderr().is_terminal() {
        Color::Red.bold().paint(msg).to_string()
    } else {
        msg.to_string()
    }
}

/// Print `headline`, then a short window of `code` around char index `pos`
/// with a caret beneath it. Line breaks in the window are shown as spaces so
/// the caret stays aligned.
pub fn print_error_with_context(headline: &str, code: &str, pos: usize) {
    eprintln!("{headline}");
    let (window, caret) = context_window(code, pos);
    eprintln!("  {window}");
    eprintln!("  {caret}");
}

fn context_window(code: &str, pos: usize) -> (String, String) {
    let start = pos.saturating_sub(WINDOW_CHARS);
    let window: String = code
        .chars()
        .skip(start)
        .take(pos - start + WINDOW_CHARS + 1)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let mut caret = " ".repeat(pos - start);
    caret.push('^');
    (window, caret)
}
