//! Operator-facing terminal output.
//!
//! `Terminal` prints styled status lines. Long-running calls get a scoped
//! [`StatusLine`] spinner that the operation finishes with `succeed` or `fail`;
//! dropping an unfinished handle just clears it.

use std::fmt::Display;
use std::io;
use std::time::Duration;

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use crate::util::is_affirmative;

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct Terminal {
    visible: bool,
}

impl Terminal {
    /// Terminal writing to stdout.
    pub fn stdout() -> Self {
        Self { visible: true }
    }

    /// Terminal that discards all output (tests, non-interactive embedding).
    pub fn hidden() -> Self {
        Self { visible: false }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn print(&self, line: impl Display) {
        if self.visible {
            println!("{}", line);
        }
    }

    pub fn blank(&self) {
        self.print("");
    }

    pub fn rule(&self) {
        self.print(style("=".repeat(RULE_WIDTH)).cyan().bright().bold());
    }

    pub fn heading(&self, text: &str) {
        self.print(style(text).white().bright().bold());
    }

    pub fn success(&self, text: &str) {
        self.print(style(text).green().bright());
    }

    pub fn warn(&self, text: &str) {
        self.print(style(text).yellow());
    }

    pub fn error(&self, text: &str) {
        self.print(style(text).red());
    }

    pub fn muted(&self, text: &str) {
        self.print(style(text).dim());
    }

    pub fn item_done(&self, text: &str) {
        self.print(format!(
            "  {} {}",
            style("☑").green().bright().bold(),
            style(text).green().bright().bold()
        ));
    }

    pub fn item_pending(&self, text: &str) {
        self.print(format!(
            "  {} {}",
            style("•").yellow().bright().bold(),
            style(text).yellow().bright().bold()
        ));
    }

    /// Centered title block shown once at startup.
    pub fn banner(&self, title: &str, subtitle: &str) {
        if !self.visible {
            return;
        }
        let width = Term::stdout().size().1 as usize;
        let width = if width == 0 { RULE_WIDTH } else { width };
        for (text, styled) in [
            (title, style(title).cyan().bright().bold()),
            (subtitle, style(subtitle).yellow().bright()),
        ] {
            let pad = width.saturating_sub(text.chars().count()) / 2;
            println!("{}{}", " ".repeat(pad), styled);
        }
        println!();
    }

    /// Start a spinner for one operation.
    pub fn status(&self, message: &str) -> StatusLine {
        let bar = if self.visible {
            let bar = ProgressBar::new_spinner();
            if let Ok(spinner) = ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "))
            {
                bar.set_style(spinner);
            }
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_message(message.to_string());
        StatusLine {
            bar,
            visible: self.visible,
        }
    }

    /// Sleep for `duration` while showing a per-second countdown.
    ///
    /// Returns `false` if `cancel` fired before the time elapsed.
    pub async fn countdown(&self, duration: Duration, cancel: &CancellationToken) -> bool {
        let line = self.status("");
        let mut remaining = duration;
        while !remaining.is_zero() {
            let secs = remaining.as_secs_f64().ceil() as u64;
            line.set_message(&format!(
                "{}",
                style(format!("Waiting {} Seconds Before Next Process...", secs)).dim()
            ));
            let step = remaining.min(Duration::from_secs(1));
            tokio::select! {
                _ = cancel.cancelled() => return false,
                _ = tokio::time::sleep(step) => {}
            }
            remaining = remaining.saturating_sub(step);
        }
        !cancel.is_cancelled()
    }

    /// Ask a yes/no question on the terminal; anything but `y`/`yes` is no.
    pub fn confirm(&self, question: &str) -> io::Result<bool> {
        let term = Term::stdout();
        term.write_str(question)?;
        let answer = term.read_line()?;
        Ok(is_affirmative(&answer))
    }
}

/// A spinner owned by exactly one in-flight operation.
pub struct StatusLine {
    bar: ProgressBar,
    visible: bool,
}

impl StatusLine {
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    pub fn succeed(self, message: &str) {
        self.bar.finish_and_clear();
        if self.visible {
            println!(
                "{} {}",
                style("✔").green().bold(),
                style(message).green().bright()
            );
        }
    }

    pub fn fail(self, message: &str) {
        self.bar.finish_and_clear();
        if self.visible {
            println!("{} {}", style("✖").red().bold(), style(message).red().bright());
        }
    }
}

impl Drop for StatusLine {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
