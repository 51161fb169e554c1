use std::fmt;
use std::path::PathBuf;

/// Failure to obtain the program text before anything runs.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read program file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that end a run. None of them are recoverable mid-run.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// A scan started at `ip` ran off the program before its depth closed.
    #[error("unmatched {kind} at instruction {ip}")]
    UnmatchedBracket { ip: usize, kind: BracketKind },

    /// `<` was executed with the pointer already on cell 0.
    #[error("pointer moved left of cell 0 at instruction {ip}")]
    PointerUnderflow { ip: usize },

    /// `,` found no more input and the EOF policy is `error`.
    #[error("input exhausted at instruction {ip}")]
    InputExhausted { ip: usize },

    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },

    #[error("execution aborted: interrupted")]
    Interrupted,
}

impl InterpreterError {
    /// Instruction index the error points at, when it has one.
    pub fn ip(&self) -> Option<usize> {
        match self {
            InterpreterError::UnmatchedBracket { ip, .. }
            | InterpreterError::PointerUnderflow { ip }
            | InterpreterError::InputExhausted { ip }
            | InterpreterError::Io { ip, .. } => Some(*ip),
            InterpreterError::StepLimitExceeded { .. } | InterpreterError::Interrupted => None,
        }
    }
}

/// Which side of the loop was left without a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "'['"),
            BracketKind::Close => write!(f, "']'"),
        }
    }
}
