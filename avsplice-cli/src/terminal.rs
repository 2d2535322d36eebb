// ============================================================================
// avsplice-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Sections, status lines, success/warning/error messages and the stage
// spinner shown while a merge runs. User-facing output goes to stdout; the
// spinner draws on stderr and is hidden when stderr is not a terminal.

use avsplice_core::{CoreError, PipelineStage};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// ============================================================================
// COLOR CONTROL
// ============================================================================

static USE_COLOR: AtomicBool = AtomicBool::new(true);

/// Set whether to use color in terminal output
pub fn set_color(enable: bool) {
    USE_COLOR.store(enable, Ordering::Relaxed);
    console::set_colors_enabled(enable);
    console::set_colors_enabled_stderr(enable);
}

/// Check if color should be used
pub fn should_use_color() -> bool {
    USE_COLOR.load(Ordering::Relaxed)
}

/// Color is on unless disabled by flag or `NO_COLOR`, and stdout is a terminal.
pub fn color_wanted(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

// ============================================================================
// UI COMPONENTS
// ============================================================================

/// Print a section header
pub fn print_section(title: &str) {
    println!();
    if should_use_color() {
        println!("===== {} =====", title.to_uppercase().cyan());
    } else {
        println!("===== {} =====", title.to_uppercase());
    }
}

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str) {
    let padding = 18usize.saturating_sub(label.len()).max(1);
    if should_use_color() {
        println!("  {}:{}{}", label, " ".repeat(padding), value.bold());
    } else {
        println!("  {}:{}{}", label, " ".repeat(padding), value);
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    if should_use_color() {
        println!("✓ {}", message.green());
    } else {
        println!("✓ {message}");
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if should_use_color() {
        println!("⚠ {}", message.yellow());
    } else {
        println!("⚠ {message}");
    }
}

/// Print a failed operation with its class, message and tool diagnostics.
pub fn print_error(error: &CoreError) {
    if should_use_color() {
        eprintln!("✗ {}", error.classification().red().bold());
    } else {
        eprintln!("✗ {}", error.classification());
    }
    eprintln!("  Message: {error}");

    if let Some(diagnostics) = error.diagnostics() {
        eprintln!("  ffmpeg output:");
        for line in diagnostics.lines() {
            if should_use_color() {
                eprintln!("    {}", line.dimmed());
            } else {
                eprintln!("    {line}");
            }
        }
    }
}

// ============================================================================
// STAGE SPINNER
// ============================================================================

/// Spinner whose message follows the merge pipeline's current stage.
pub struct StageSpinner {
    bar: ProgressBar,
}

impl StageSpinner {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("  {spinner} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);

        if !std::io::stderr().is_terminal() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn set_stage(&self, stage: PipelineStage) {
        self.bar.set_message(stage.to_string());
    }

    /// Removes the spinner line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for StageSpinner {
    fn default() -> Self {
        Self::new()
    }
}
