// Compact widget view: title plus either the alert count or an error.
//
// Reads the same fetch result as the check run but never touches the
// seen set.

use colored::Colorize;

use crate::hamsat::models::Alert;

pub const WIDGET_TITLE: &str = "🛰️ HAMS.AT";
pub const WIDGET_BACKGROUND: &str = "#1c1c1e";

/// How the status line should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Highlight,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetLine {
    pub text: String,
    pub tone: Tone,
}

/// Everything a host needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub title: &'static str,
    pub background: &'static str,
    pub line: WidgetLine,
}

/// Build the widget for a fetch result. `None` means the fetch failed.
pub fn render(alerts: Option<&[Alert]>) -> WidgetView {
    let line = match alerts {
        Some(alerts) => WidgetLine {
            text: format!("{} upcoming alerts", alerts.len()),
            tone: Tone::Highlight,
        },
        None => WidgetLine {
            text: "Error loading".to_string(),
            tone: Tone::Error,
        },
    };

    WidgetView {
        title: WIDGET_TITLE,
        background: WIDGET_BACKGROUND,
        line,
    }
}

/// Draw the widget in the terminal.
pub fn display(view: &WidgetView) {
    println!();
    println!("{}", view.title.bold());
    println!();
    let text = match view.line.tone {
        Tone::Highlight => view.line.text.truecolor(255, 149, 0),
        Tone::Error => view.line.text.red(),
    };
    println!("{text}");
}
