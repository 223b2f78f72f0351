use std::io::IsTerminal;
use std::time::Duration;

use anstyle::{AnsiColor, Style};
use indicatif::{ProgressBar, ProgressStyle};
use sonopack_migrator::RelocationStats;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputStyle {
    Plain,
    Rich,
}

pub fn current_output_style() -> OutputStyle {
    if std::io::stdout().is_terminal() {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => format!("[{status}] {message}"),
        OutputStyle::Rich => {
            let accent = status_style(status);
            format!(
                "{}{status:>9}{} {message}",
                accent.render(),
                accent.render_reset()
            )
        }
    }
}

pub fn start_spinner(style: OutputStyle, label: &str) -> Option<ProgressBar> {
    if style != OutputStyle::Rich {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::with_template("{spinner:.cyan.bold} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(label.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    Some(spinner)
}

pub fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

pub fn relocation_summary_lines(stats: &RelocationStats) -> Vec<String> {
    vec![
        format!("moved: {}", stats.moved),
        format!("copied: {}", stats.copied),
        format!("kept existing targets: {}", stats.skipped_existing),
        format!("failed to place: {}", stats.failed),
        format!("failed to delete from source: {}", stats.delete_failed),
    ]
}

fn status_style(status: &str) -> Style {
    let color = match status {
        "error" | "rejected" => AnsiColor::Red,
        "upgrade" | "staged" | "done" => AnsiColor::Green,
        _ => AnsiColor::Cyan,
    };
    Style::new().bold().fg_color(Some(color.into()))
}
