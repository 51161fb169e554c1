use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use cross_xdg::BaseDirs;

pub const CONFIG_FILE_NAME: &str = "tape-bf.toml";

/// What `,` does when the input stream has no more bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// End the run with `InputExhausted`.
    #[default]
    Error,
    /// Store 0 in the current cell.
    Zero,
    /// Leave the current cell as it is.
    Unchanged,
}

impl FromStr for EofPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(EofPolicy::Error),
            "zero" => Ok(EofPolicy::Zero),
            "unchanged" => Ok(EofPolicy::Unchanged),
            other => Err(format!(
                "invalid eof value: {other}, must be 'error', 'zero' or 'unchanged'"
            )),
        }
    }
}

/// Interpreter policies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub eof: EofPolicy,
    /// Abort after this many executed instructions. `None` runs forever.
    pub max_steps: Option<usize>,
    /// Write a step-by-step table of every instruction to stderr.
    pub trace: bool,
}

impl Config {
    /// Load `tape-bf.toml` from the XDG config home.
    ///
    /// A missing file or an undeterminable home directory yields the defaults.
    /// Problems with individual keys are reported on stderr and skipped.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };

        let (config, warnings) = Self::parse(&content);
        for warning in warnings {
            eprintln!("{}: {warning}", path.display());
        }
        config
    }

    /// Parse the `[interpreter]` section of a small TOML subset.
    ///
    /// Only `key = value` lines are understood; values may be quoted. Returns
    /// the config plus one message per line that could not be applied.
    pub fn parse(content: &str) -> (Self, Vec<String>) {
        let mut cfg = Self::default();
        let mut warnings = Vec::new();
        let mut in_interpreter = false;

        for (n, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                in_interpreter = line[1..line.len() - 1].trim() == "interpreter";
                continue;
            }
            if !in_interpreter {
                continue;
            }

            let Some((key, raw)) = line.split_once('=') else {
                warnings.push(format!("line {}: expected 'key = value'", n + 1));
                continue;
            };
            let key = key.trim();
            let value = unquote(raw.trim());

            let applied = match key {
                "eof" => value.parse::<EofPolicy>().map(|p| cfg.eof = p),
                "max_steps" => value
                    .parse::<usize>()
                    .map(|n| cfg.max_steps = Some(n))
                    .map_err(|e| format!("invalid max_steps value: {value} ({e})")),
                "trace" => value
                    .parse::<bool>()
                    .map(|b| cfg.trace = b)
                    .map_err(|_| format!("invalid trace value: {value}, must be true or false")),
                other => Err(format!("unknown key '{other}'")),
            };

            if let Err(msg) = applied {
                warnings.push(format!("line {}: {msg}", n + 1));
            }
        }

        (cfg, warnings)
    }
}

/// On Linux this resolves to `$XDG_CONFIG_HOME/tape-bf.toml`, usually
/// `~/.config/tape-bf.toml`.
pub fn config_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE_NAME);
    Some(path)
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
