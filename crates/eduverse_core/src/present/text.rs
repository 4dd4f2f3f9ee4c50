//! Plain-text presenter for terminals and logs.

use super::{BadgeState, NotificationPresenter, NotificationView};
use log::warn;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

const EMPTY_LIST_TEXT: &str = "No notifications";

/// Writes one line per row followed by a badge line.
///
/// Row format: `<marker> #<id> [<kind icon>] <title>: <message> (<age>)`,
/// where the marker is `*` for unread rows and a space otherwise.
pub struct TextPresenter<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(out, "{line}"))
            .and_then(|()| out.flush());
        if let Err(err) = result {
            warn!("event=render module=present status=error presenter=text error={err}");
        }
    }
}

impl<W: Write + Send> NotificationPresenter for TextPresenter<W> {
    fn render_list(&self, rows: &[NotificationView]) {
        if rows.is_empty() {
            self.write_lines(&[EMPTY_LIST_TEXT.to_string()]);
            return;
        }
        let lines: Vec<String> = rows.iter().map(format_row).collect();
        self.write_lines(&lines);
    }

    fn render_badge(&self, badge: BadgeState) {
        let line = match badge {
            BadgeState::Hidden => "unread: none".to_string(),
            BadgeState::Count(_) => format!("unread: {badge}"),
        };
        self.write_lines(&[line]);
    }
}

fn format_row(row: &NotificationView) -> String {
    let marker = if row.unread { '*' } else { ' ' };
    let mut line = format!(
        "{marker} #{} [{}] {}: {} ({})",
        row.id, row.icon_class, row.title, row.message, row.age
    );
    if let Some(action) = &row.action {
        let label = action.label.as_deref().unwrap_or("open");
        line.push_str(&format!(" -> {label}: {}", action.url));
    }
    line
}
