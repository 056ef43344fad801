use log::{debug, warn};
use serde::Serialize;

use std::fmt;

use crate::internal_error::{InternalError, InternalResult};
use crate::root::shell::AppContext;
use crate::views::View;

const MAX_REDIRECTS: usize = 8;

/// Oldest entries are dropped past this many.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RouteName {
    Todos,
    Roadmap,
    NotFound,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Todos => "todos",
            RouteName::Roadmap => "roadmap",
            RouteName::NotFound => "not-found",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    Redirect(&'static str),
    View(RouteName),
}

#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub path: &'static str,
    pub target: RouteTarget,
}

/// Ordered, first match wins. Anything unmatched falls through to `NotFound`.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: "/",
        target: RouteTarget::Redirect("/todos"),
    },
    RouteEntry {
        path: "/todos",
        target: RouteTarget::View(RouteName::Todos),
    },
    RouteEntry {
        path: "/roadmap",
        target: RouteTarget::View(RouteName::Roadmap),
    },
];

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: RouteName,
    pub path: String,
    pub redirected: bool,
}

/// Drops the query and fragment and a trailing slash, and lowercases the rest.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let path = path[..end].trim_end_matches('/');

    if path.starts_with('/') {
        path.to_ascii_lowercase()
    } else {
        format!("/{}", path.to_ascii_lowercase())
    }
}

pub fn resolve(path: &str) -> InternalResult<Resolution> {
    let mut current = normalize_path(path);
    let mut redirected = false;

    for _ in 0..MAX_REDIRECTS {
        match ROUTES.iter().find(|entry| entry.path == current) {
            Some(RouteEntry {
                target: RouteTarget::Redirect(to),
                ..
            }) => {
                debug!("redirecting {} to {}", current, to);
                current = normalize_path(to);
                redirected = true;
            }
            Some(RouteEntry {
                target: RouteTarget::View(route),
                ..
            }) => {
                return Ok(Resolution {
                    route: *route,
                    path: current,
                    redirected,
                })
            }
            None => {
                warn!("no route for {}", current);
                return Ok(Resolution {
                    route: RouteName::NotFound,
                    path: current,
                    redirected,
                });
            }
        }
    }

    Err(InternalError::RedirectLoop(path.to_string()))
}

pub type ViewFactory = Box<dyn Fn(RouteName) -> Box<dyn View> + Send>;

/// History-based navigation over `ROUTES`. Holds at most one mounted view; the
/// outgoing view is unmounted before the incoming one is mounted.
pub struct Router {
    factory: ViewFactory,
    active: Option<Box<dyn View>>,
    history: Vec<String>,
    position: usize,
}

impl Router {
    pub fn new(factory: ViewFactory) -> Router {
        Router {
            factory,
            active: None,
            history: vec![],
            position: 0,
        }
    }

    pub fn navigate(&mut self, path: &str, context: &mut AppContext) -> InternalResult<Resolution> {
        let resolution = resolve(path)?;

        if self.current_path() != Some(resolution.path.as_str()) {
            if !self.history.is_empty() {
                self.history.truncate(self.position + 1);
            }
            self.history.push(resolution.path.clone());
            if self.history.len() > HISTORY_LIMIT {
                let excess = self.history.len() - HISTORY_LIMIT;
                self.history.drain(..excess);
            }
            self.position = self.history.len() - 1;
        }

        self.activate(resolution.route, context);
        Ok(resolution)
    }

    pub fn back(&mut self, context: &mut AppContext) -> InternalResult<Option<Resolution>> {
        if self.position == 0 || self.history.is_empty() {
            return Ok(None);
        }

        self.position -= 1;
        self.revisit(context).map(Some)
    }

    pub fn forward(&mut self, context: &mut AppContext) -> InternalResult<Option<Resolution>> {
        if self.position + 1 >= self.history.len() {
            return Ok(None);
        }

        self.position += 1;
        self.revisit(context).map(Some)
    }

    fn revisit(&mut self, context: &mut AppContext) -> InternalResult<Resolution> {
        let resolution = resolve(&self.history[self.position])?;
        self.activate(resolution.route, context);

        Ok(resolution)
    }

    fn activate(&mut self, route: RouteName, context: &mut AppContext) {
        if self.active_route() == Some(route) {
            return;
        }

        if let Some(mut outgoing) = self.active.take() {
            debug!("unmounting {}", outgoing.route());
            outgoing.unmount(context);
        }

        let mut incoming = (self.factory)(route);
        debug!("mounting {}", route);
        incoming.mount(context);
        self.active = Some(incoming);
    }

    pub fn current_path(&self) -> Option<&str> {
        self.history.get(self.position).map(|path| path.as_str())
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn active_route(&self) -> Option<RouteName> {
        self.active.as_ref().map(|view| view.route())
    }

    pub fn active_view(&self) -> Option<&dyn View> {
        self.active.as_deref()
    }
}
