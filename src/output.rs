//! # Terminal Output
//!
//! Controls how the CLI reports progress: colour and emoji when the terminal
//! supports them, plain text otherwise, and nothing at all in quiet mode.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! Reports go to stdout unless the composed script itself is printed there, in
//! which case they move to stderr. Logging (see `env_logger` in the binary)
//! always goes to stderr.

use std::env;

use console::style;

/// Prefix of the unresolved-dependency summary line.
pub const FAILURE_PREFIX: &str = "FAILED TO FIND INSTALLATION INSTRUCTIONS FOR:";

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
    /// Suppress progress reports.
    pub quiet: bool,
    /// Send reports to stderr instead of stdout.
    pub to_stderr: bool,
}

impl OutputConfig {
    /// Create an output configuration from the environment and the value of
    /// the `--color` flag (`always`, `never` or `auto`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self {
            use_color,
            quiet: false,
            to_stderr: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn to_stderr(mut self, to_stderr: bool) -> Self {
        self.to_stderr = to_stderr;
        self
    }

    fn emit(&self, line: impl std::fmt::Display) {
        if self.to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    /// The emoji when colors are enabled, the plain marker otherwise.
    pub fn marker<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    /// Print a progress line unless quiet.
    pub fn report(&self, emoji: &str, plain: &str, message: impl std::fmt::Display) {
        if !self.quiet {
            self.emit(format_args!("{} {}", self.marker(emoji, plain), message));
        }
    }

    /// Print the unresolved-dependency summary, if there is anything to report.
    ///
    /// The summary is advisory and printed even in quiet mode.
    pub fn report_failures(&self, failures: &[String]) {
        if let Some(line) = failure_summary(failures) {
            if self.use_color {
                self.emit(style(line).yellow());
            } else {
                self.emit(line);
            }
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// One summary line naming every unresolved dependency, or `None` when there
/// are none.
pub fn failure_summary(failures: &[String]) -> Option<String> {
    if failures.is_empty() {
        None
    } else {
        Some(format!("{} {}", FAILURE_PREFIX, failures.join(", ")))
    }
}
