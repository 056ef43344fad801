use super::View;
use crate::root::shell::AppContext;
use crate::router::RouteName;

#[derive(Debug, Default)]
pub struct NotFoundView;

impl View for NotFoundView {
    fn route(&self) -> RouteName {
        RouteName::NotFound
    }

    fn mount(&mut self, _context: &mut AppContext) {}

    fn unmount(&mut self, _context: &mut AppContext) {}

    fn render(&self, _context: &AppContext) -> String {
        r#"<div class="not-found"><h1>Page not found</h1><p><a href="/todos">Todos</a> · <a href="/roadmap">Roadmap</a></p></div>"#
            .to_string()
    }
}
