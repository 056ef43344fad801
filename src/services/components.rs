use crate::data::Priority;
use crate::services::toast::Toast;

/// Pre-built widgets handed to views through the context. Implementations return
/// HTML fragments and must escape any text they are given.
pub trait ComponentLibrary: Send {
    fn button(&self, label: &str, action: &str) -> String;
    fn checkbox(&self, label: &str, checked: bool) -> String;
    fn tag(&self, label: &str, severity: &str) -> String;
    fn progress_bar(&self, value: f64) -> String;
    fn panel(&self, header: &str, body: &str) -> String;
    fn toast(&self, toast: &Toast) -> String;
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

pub fn priority_severity(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "info",
        Priority::Medium => "warning",
        Priority::High => "danger",
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BasicComponents;

impl ComponentLibrary for BasicComponents {
    fn button(&self, label: &str, action: &str) -> String {
        format!(
            r#"<button class="p-button" data-action="{}">{}</button>"#,
            escape(action),
            escape(label)
        )
    }

    fn checkbox(&self, label: &str, checked: bool) -> String {
        format!(
            r#"<label class="p-checkbox"><input type="checkbox"{} /> {}</label>"#,
            if checked { " checked" } else { "" },
            escape(label)
        )
    }

    fn tag(&self, label: &str, severity: &str) -> String {
        format!(
            r#"<span class="p-tag p-tag-{}">{}</span>"#,
            escape(severity),
            escape(label)
        )
    }

    fn progress_bar(&self, value: f64) -> String {
        let value = clamp_progress(value);

        format!(
            r#"<div class="p-progressbar" role="progressbar" aria-valuenow="{value:.0}"><div class="p-progressbar-value" style="width: {value:.0}%"></div></div>"#,
            value = value
        )
    }

    fn panel(&self, header: &str, body: &str) -> String {
        format!(
            r#"<section class="p-panel"><header class="p-panel-header">{}</header><div class="p-panel-content">{}</div></section>"#,
            escape(header),
            body
        )
    }

    fn toast(&self, toast: &Toast) -> String {
        format!(
            r#"<div class="p-toast-message p-toast-message-{}" data-life="{}"><strong>{}</strong> {}</div>"#,
            toast.severity.as_str(),
            toast.life,
            escape(&toast.summary),
            escape(&toast.detail)
        )
    }
}
