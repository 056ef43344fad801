use log::{debug, info};
use once_cell::sync::OnceCell;

use std::fs;
use std::path::Path;

use crate::config::AppConfig;
use crate::internal_error::{InternalError, InternalResult};
use crate::roadmap::store::RoadmapStore;
use crate::router::{Resolution, RouteName, Router, ViewFactory};
use crate::services::components::escape;
use crate::services::Services;
use crate::todo::data::{Settings, TodoID};
use crate::todo::store::TodoStore;
use crate::views;

static BOOTED: OnceCell<()> = OnceCell::new();

/// Everything a view may touch, handed to it explicitly on mount and render.
#[derive(Default)]
pub struct AppContext {
    pub services: Services,
    pub todos: TodoStore,
    pub roadmap: RoadmapStore,
    pub settings: Settings,
}

impl AppContext {
    pub fn new(services: Services, settings: Settings) -> AppContext {
        let mut todos = TodoStore::new();
        todos.apply_settings(&settings);

        AppContext {
            services,
            todos,
            roadmap: RoadmapStore::new(),
            settings,
        }
    }

    pub fn update_settings(&mut self, settings: Settings) -> Vec<TodoID> {
        self.settings = settings;
        let purged = self.todos.apply_settings(&settings);

        if !purged.is_empty() {
            self.services
                .toasts
                .success("Cleaned up", format!("Removed {} completed todo(s)", purged.len()));
        }

        purged
    }
}

/// The host page split around the mount element, so a view can be placed inside it.
#[derive(Debug, Clone)]
pub struct HostPage {
    before: String,
    after: String,
    target: String,
}

impl HostPage {
    pub fn parse(html: &str, target: &str, source: &Path) -> InternalResult<HostPage> {
        let missing = || InternalError::MountTargetMissing {
            target: target.to_string(),
            page: source.to_path_buf(),
        };

        let mut attributes: Vec<usize> = [format!("id=\"{}\"", target), format!("id='{}'", target)]
            .iter()
            .flat_map(|needle| html.match_indices(needle.as_str()).map(|(at, _)| at))
            .filter(|&at| html[..at].ends_with(|c: char| c.is_ascii_whitespace()))
            .collect();
        attributes.sort_unstable();

        // The attribute has to sit inside an opening tag.
        let tag_end = attributes
            .into_iter()
            .find_map(|at| {
                let tag_start = html[..at].rfind('<')?;
                if html[tag_start..at].contains('>') {
                    return None;
                }
                Some(at + html[at..].find('>')? + 1)
            })
            .ok_or_else(missing)?;

        Ok(HostPage {
            before: html[..tag_end].to_string(),
            after: html[tag_end..].to_string(),
            target: target.to_string(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn mount(&self, content: &str) -> String {
        format!("{}{}{}", self.before, content, self.after)
    }
}

pub struct Shell {
    page: HostPage,
    router: Router,
    context: AppContext,
}

impl Shell {
    pub fn new(config: &AppConfig, host_page: &str) -> InternalResult<Shell> {
        Shell::with_factory(config, host_page, views::default_factory())
    }

    pub fn with_factory(
        config: &AppConfig,
        host_page: &str,
        factory: ViewFactory,
    ) -> InternalResult<Shell> {
        let page = HostPage::parse(host_page, &config.mount_target, &config.host_page)?;

        let context = AppContext::new(Services::default(), config.initial_settings());
        debug!("registered toast service and component library");

        Ok(Shell {
            page,
            router: Router::new(factory),
            context,
        })
    }

    /// One-time process bootstrap. Reads the configured host page and refuses to run
    /// a second time; a missing mount element is fatal.
    pub fn boot(config: &AppConfig) -> InternalResult<Shell> {
        if BOOTED.set(()).is_err() {
            return Err(InternalError::AlreadyBooted);
        }

        let html = fs::read_to_string(&config.host_page)?;
        let shell = Shell::new(config, &html)?;
        info!(
            "application shell mounted at #{} of {}",
            shell.page.target(),
            config.host_page.display()
        );

        Ok(shell)
    }

    pub fn navigate(&mut self, path: &str) -> InternalResult<Resolution> {
        let resolution = self.router.navigate(path, &mut self.context)?;
        debug!("{} resolved to {}", path, resolution.route);

        Ok(resolution)
    }

    pub fn back(&mut self) -> InternalResult<Option<Resolution>> {
        self.router.back(&mut self.context)
    }

    pub fn forward(&mut self) -> InternalResult<Option<Resolution>> {
        self.router.forward(&mut self.context)
    }

    pub fn active_route(&self) -> Option<RouteName> {
        self.router.active_route()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    /// Renders the active view inside the host page and hands out pending toasts.
    pub fn render(&mut self) -> String {
        let route = self.router.active_route().unwrap_or(RouteName::NotFound);
        let view = match self.router.active_view() {
            Some(view) => view.render(&self.context),
            None => String::new(),
        };

        let components = self.context.services.components.as_ref();
        let toasts = self
            .context
            .services
            .toasts
            .pending()
            .map(|toast| components.toast(toast))
            .collect::<String>();
        self.context.services.toasts.clear();

        self.page.mount(&format!(
            r#"<div class="view view-{} theme-{}" data-route="{}"><div class="toasts">{}</div>{}</div>"#,
            route,
            escape(self.context.settings.theme.as_str()),
            route,
            toasts,
            view
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Priority;
    use crate::todo::data::Theme;
    use crate::todo::forms::TodoForm;

    const PAGE: &str = r#"<!DOCTYPE html><html><body><div id="app" class="root"></div><script src="/static/app.js"></script></body></html>"#;

    #[test]
    fn view_is_mounted_inside_the_target() {
        let mut shell = Shell::new(&AppConfig::default(), PAGE).unwrap();
        shell.navigate("/").unwrap();

        let html = shell.render();
        assert!(html.starts_with(r#"<!DOCTYPE html><html><body><div id="app" class="root"><div class="view view-todos"#));
        assert!(html.ends_with(r#"</div></div><script src="/static/app.js"></script></body></html>"#));
        assert_eq!(shell.active_route(), Some(RouteName::Todos));
    }

    #[test]
    fn missing_mount_target_is_reported() {
        for page in [
            "<html><body></body></html>",
            r#"<html><body><div id="application"></div></body></html>"#,
            r#"<html><body><p>id="app"</p></body></html>"#,
        ] {
            match Shell::new(&AppConfig::default(), page) {
                Err(InternalError::MountTargetMissing { target, .. }) => assert_eq!(target, "app"),
                Err(other) => panic!("unexpected error {:?}", other),
                Ok(_) => panic!("mounted into {}", page),
            }
        }
    }

    #[test]
    fn single_quoted_and_custom_targets_are_found() {
        let config = AppConfig {
            mount_target: "planner".to_string(),
            ..AppConfig::default()
        };
        let shell = Shell::new(&config, "<main id='planner'></main>").unwrap();

        assert_eq!(shell.page.mount("x"), "<main id='planner'>x</main>");
    }

    #[test]
    fn only_a_real_id_attribute_is_a_mount_target() {
        let page = r#"<html><body><nav data-id="app"></nav><p> id="app"</p><section
  id="app"></section></body></html>"#;
        let shell = Shell::new(&AppConfig::default(), page).unwrap();

        assert!(shell
            .page
            .mount("x")
            .ends_with(r#"<section
  id="app">x</section></body></html>"#));

        for page in [
            r#"<div data-id="app"></div>"#,
            r#"<div aria-id='app'></div>"#,
            r#"<div id="app"></div>"#.trim_start_matches('<'),
        ] {
            assert!(matches!(
                Shell::new(&AppConfig::default(), page),
                Err(InternalError::MountTargetMissing { .. })
            ));
        }
    }

    #[test]
    fn render_drains_toasts_and_applies_theme() {
        let mut shell = Shell::new(&AppConfig::default(), PAGE).unwrap();
        shell.context_mut().update_settings(Settings {
            theme: Theme::Sunset,
            auto_delete_completed: false,
        });
        shell.navigate("/todos").unwrap();
        shell.context_mut().services.toasts.success("Saved", "Todo <added>");

        let html = shell.render();
        assert!(html.contains("theme-sunset"));
        assert!(html.contains("Todo &lt;added&gt;"));
        assert!(!shell.render().contains("Todo &lt;added&gt;"));
    }

    #[test]
    fn roadmap_round_trip_does_not_leak_state() {
        let mut shell = Shell::new(&AppConfig::default(), PAGE).unwrap();
        shell
            .context_mut()
            .todos
            .add(TodoForm::new("Buy milk", Priority::Medium))
            .unwrap();

        shell.navigate("/todos").unwrap();
        let first = shell.render();
        shell.navigate("/roadmap").unwrap();
        assert!(shell.render().contains(r#"data-route="roadmap""#));
        shell.navigate("/todos").unwrap();
        let again = shell.render();

        assert_eq!(first, again);
        assert!(!again.contains("roadmap-item"));
        assert!(!again.contains("Nothing planned."));
    }

    #[test]
    fn auto_delete_setting_purges_and_notifies() {
        let mut shell = Shell::new(&AppConfig::default(), PAGE).unwrap();
        let context = shell.context_mut();
        let todo = context.todos.add(TodoForm::new("Done", Priority::Low)).unwrap();
        context.todos.set_completed(todo.id, true).unwrap();

        let purged = context.update_settings(Settings {
            theme: Theme::Default,
            auto_delete_completed: true,
        });

        assert_eq!(purged, vec![todo.id]);
        assert_eq!(context.services.toasts.pending().count(), 1);
    }
}
