//! Interpreter configuration.

/// How the engine treats malformed script bytes it is asked to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// A truncated push is reported as a `MalformedPush` error.
    #[default]
    Strict,
    /// A truncated push is logged and the script is treated as empty.
    Legacy,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub parse_mode: ParseMode,
}

impl Config {
    /// Distinguishable parse failures.
    pub fn strict() -> Self {
        Config {
            parse_mode: ParseMode::Strict,
        }
    }

    /// Bit-exact legacy behavior: malformed scripts parse to empty.
    pub fn legacy() -> Self {
        Config {
            parse_mode: ParseMode::Legacy,
        }
    }
}
