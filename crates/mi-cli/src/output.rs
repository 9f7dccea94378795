//! Colored report output for CLI commands.
//!
//! Uses `termcolor`; respects `NO_COLOR` and the `--color` flag.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Outcome of one reported check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Check passed
    Pass,
    /// Check failed
    Fail,
    /// Check could not run here
    Skip,
}

impl Verdict {
    fn badge(self) -> (&'static str, Color, Color) {
        match self {
            Verdict::Pass => (" PASS ", Color::Green, Color::White),
            Verdict::Fail => (" FAIL ", Color::Red, Color::White),
            Verdict::Skip => (" SKIP ", Color::Yellow, Color::Black),
        }
    }
}

/// Styled stdout writer.
pub struct StyledOutput {
    stdout: StandardStream,
}

impl StyledOutput {
    /// Create a writer with the given color choice.
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }

    fn styled(&mut self, text: &str, spec: &ColorSpec) {
        let _ = self.stdout.set_color(spec);
        let _ = write!(self.stdout, "{}", text);
        let _ = self.stdout.reset();
    }

    /// Bold heading line.
    pub fn heading(&mut self, text: &str) {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        self.styled(text, &spec);
        let _ = writeln!(self.stdout);
    }

    /// `label: value` line with the label in cyan.
    pub fn field(&mut self, label: &str, value: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        self.styled(&format!("{:<14}", format!("{}:", label)), &spec);
        let _ = writeln!(self.stdout, "{}", value);
    }

    /// Badge followed by a description.
    pub fn verdict(&mut self, verdict: Verdict, text: &str) {
        let (label, bg, fg) = verdict.badge();
        let mut spec = ColorSpec::new();
        spec.set_bg(Some(bg)).set_fg(Some(fg)).set_bold(true);
        self.styled(label, &spec);
        let _ = writeln!(self.stdout, " {}", text);
    }

    /// Unstyled text, written as-is.
    pub fn plain(&mut self, text: &str) {
        let _ = write!(self.stdout, "{}", text);
    }

    /// Flush stdout.
    pub fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}
