/*!
 * spare CLI style helpers
 *
 * Themed text, status lines and the settings box shown before a build.
 */

use console::{measure_text_width, style, StyledObject};

// ============================================================================
// THEME COLORS
// ============================================================================

/// Colors for consistent styling
pub struct Theme;

impl Theme {
    /// Primary accent color (cyan)
    pub fn primary<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).cyan()
    }

    pub fn success<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).green()
    }

    pub fn warning<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).yellow()
    }

    pub fn error<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).red()
    }

    /// Muted/secondary text (dim)
    pub fn muted<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).dim()
    }

    /// Header style (bold cyan)
    pub fn header<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).cyan().bold()
    }

    /// Value highlight (bold white)
    pub fn value<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).white().bold()
    }
}

// ============================================================================
// ICONS
// ============================================================================

/// Unicode icons for visual feedback
pub struct Icons;

impl Icons {
    pub const SUCCESS: &'static str = "✓";
    pub const ERROR: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const INFO: &'static str = "ℹ";
    pub const ROCKET: &'static str = "🚀";
    pub const GLOBE: &'static str = "🌐";
    pub const ARROW_RIGHT: &'static str = "→";
}

// ============================================================================
// BOXES
// ============================================================================

/// Section title followed by a rule
pub fn section_header(title: &str) -> String {
    let line_len = 50 - title.len().min(40);
    format!(
        "\n{} {}",
        Theme::header(title),
        Theme::muted("─".repeat(line_len))
    )
}

/// Render `(label, value)` rows as a framed box
pub fn settings_box(title: &str, rows: &[(&str, String)]) -> String {
    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let lines: Vec<String> = rows
        .iter()
        .map(|(label, value)| format!("{:<label_width$}  {}", label, value))
        .collect();
    let width = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(40)
        .max(title.len() + 4)
        + 4;

    let mut out = format!(
        "┌── {} {}┐\n",
        title,
        "─".repeat(width.saturating_sub(title.len() + 4))
    );
    for line in &lines {
        let pad = width.saturating_sub(measure_text_width(line) + 2);
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("└{}┘", "─".repeat(width)));
    out
}

// ============================================================================
// STATUS LINES
// ============================================================================

/// Print a styled error message with optional suggestion
pub fn print_error(message: &str, suggestion: Option<&str>) {
    eprintln!(
        "\n{} {}",
        Theme::error(format!("{} Error:", Icons::ERROR)),
        message
    );

    if let Some(hint) = suggestion {
        eprintln!(
            "  {} {}",
            Theme::muted(Icons::ARROW_RIGHT),
            Theme::muted(hint)
        );
    }
    eprintln!();
}

pub fn print_warning(message: &str) {
    eprintln!(
        "{} {}",
        Theme::warning(Icons::WARNING.to_string()),
        Theme::warning(message)
    );
}

pub fn print_success(message: &str) {
    println!(
        "{} {}",
        Theme::success(Icons::SUCCESS.to_string()),
        Theme::success(message)
    );
}

pub fn print_info(message: &str) {
    println!("{} {}", Theme::primary(Icons::INFO.to_string()), message);
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.5), "500ms");
        assert_eq!(format_duration(1.0), "1.0s");
        assert_eq!(format_duration(65.0), "1m 5s");
    }

    #[test]
    fn test_settings_box_is_rectangular() {
        let rendered = settings_box(
            "Build",
            &[
                ("Bucket", "spare-us-east-1-abc".to_string()),
                ("Region", "us-east-1".to_string()),
            ],
        );
        let widths: Vec<usize> = rendered.lines().map(measure_text_width).collect();
        assert_eq!(widths.len(), 4);
        assert!(widths.iter().all(|w| *w == widths[0]), "{rendered}");
        assert!(rendered.contains("Bucket  spare-us-east-1-abc"));
    }

    #[test]
    fn test_section_header_rule_shrinks_with_title() {
        let short = console::strip_ansi_codes(&section_header("Deploying")).to_string();
        assert!(short.starts_with("\nDeploying ─"));
        assert_eq!(measure_text_width(short.trim_start()), "Deploying ".len() + 41);

        let long = console::strip_ansi_codes(&section_header(&"x".repeat(60))).to_string();
        assert!(long.ends_with(&"─".repeat(10)));
    }
}
