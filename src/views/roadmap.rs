use chrono::{Datelike, Local};

use super::View;
use crate::roadmap::data::{RoadmapItem, Status};
use crate::root::shell::AppContext;
use crate::router::RouteName;
use crate::services::components::{escape, priority_severity, ComponentLibrary};

fn status_severity(status: Status) -> &'static str {
    match status {
        Status::Planned => "secondary",
        Status::InProgress => "info",
        Status::Completed => "success",
    }
}

/// Shows one year of the roadmap, grouped by quarter. The year is picked on mount:
/// the latest year that has items, or the current one.
#[derive(Debug, Default)]
pub struct RoadmapView {
    year: Option<i32>,
}

impl RoadmapView {
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    fn view_item(item: &RoadmapItem, context: &AppContext) -> String {
        let components = context.services.components.as_ref();

        let topic = match context.roadmap.topic_for(item) {
            Some(topic) => format!(
                r#"<span class="roadmap-topic" style="border-color: {}">{}</span>"#,
                escape(&topic.color),
                escape(&topic.name)
            ),
            None if !item.topic.is_empty() => format!(
                r#"<span class="roadmap-topic roadmap-topic-unknown">{}</span>"#,
                escape(&item.topic)
            ),
            None => String::new(),
        };

        format!(
            r#"<li class="roadmap-item" data-item-id="{}"><h3>{}</h3>{}{}{}<p>{}</p>{}</li>"#,
            item.id,
            escape(&item.title),
            topic,
            components.tag(item.status.as_str(), status_severity(item.status)),
            components.tag(item.priority.as_str(), priority_severity(item.priority)),
            escape(&item.description),
            components.progress_bar(item.progress)
        )
    }

    fn view_topics(context: &AppContext, components: &dyn ComponentLibrary) -> String {
        let topics = context.roadmap.topics();
        if topics.is_empty() {
            return String::new();
        }

        let body = topics
            .iter()
            .map(|topic| {
                format!(
                    r#"<li data-topic-id="{}" style="color: {}">{} <small>{}</small></li>"#,
                    topic.id,
                    escape(&topic.color),
                    escape(&topic.name),
                    escape(&topic.description)
                )
            })
            .collect::<String>();

        components.panel("Topics", &format!("<ul>{}</ul>", body))
    }
}

impl View for RoadmapView {
    fn route(&self) -> RouteName {
        RouteName::Roadmap
    }

    fn mount(&mut self, context: &mut AppContext) {
        let latest = context.roadmap.years().into_iter().next_back();
        self.year = Some(latest.unwrap_or_else(|| Local::now().year()));
    }

    fn unmount(&mut self, _context: &mut AppContext) {
        self.year = None;
    }

    fn render(&self, context: &AppContext) -> String {
        let components = context.services.components.as_ref();
        let year = self.year.unwrap_or_else(|| Local::now().year());

        let mut html = format!(
            r#"<div class="roadmap" data-year="{}"><header><h1>Roadmap {}</h1>{}</header>"#,
            year,
            year,
            components.button("Add item", "add-roadmap-item")
        );

        for (quarter, items) in context.roadmap.by_quarter(year) {
            let body = if items.is_empty() {
                r#"<p class="empty">Nothing planned.</p>"#.to_string()
            } else {
                format!(
                    "<ul>{}</ul>",
                    items
                        .iter()
                        .map(|item| RoadmapView::view_item(item, context))
                        .collect::<String>()
                )
            };

            html.push_str(&components.panel(&format!("{} {}", quarter, year), &body));
        }

        html.push_str(&RoadmapView::view_topics(context, components));
        html.push_str("</div>");
        html
    }
}
