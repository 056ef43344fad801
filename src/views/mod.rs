pub mod not_found;
pub mod roadmap;
pub mod todos;

use crate::root::shell::AppContext;
use crate::router::{RouteName, ViewFactory};

pub use not_found::NotFoundView;
pub use roadmap::RoadmapView;
pub use todos::TodoListView;

/// A page-level view. State created in `mount` belongs to this instance only and
/// is dropped with it after `unmount`.
pub trait View: Send {
    fn route(&self) -> RouteName;
    fn mount(&mut self, context: &mut AppContext);
    fn unmount(&mut self, context: &mut AppContext);
    fn render(&self, context: &AppContext) -> String;
}

pub fn view_for(route: RouteName) -> Box<dyn View> {
    match route {
        RouteName::Todos => Box::new(TodoListView::default()),
        RouteName::Roadmap => Box::new(RoadmapView::default()),
        RouteName::NotFound => Box::new(NotFoundView),
    }
}

pub fn default_factory() -> ViewFactory {
    Box::new(view_for)
}
