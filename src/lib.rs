pub mod config;
pub mod data;
pub mod internal_error;
pub mod roadmap;
pub mod root;
pub mod router;
pub mod services;
pub mod todo;
pub mod views;

use rocket::fairing::AdHoc;
use rocket::fs::{FileServer, Options};
use rocket::{catchers, routes, Build, Rocket};

use std::sync::{Arc, Mutex};

use config::AppConfig;
use root::endpoints;
use root::shell::Shell;

fn mount(rocket: Rocket<Build>, config: &AppConfig) -> Rocket<Build> {
    rocket
        .mount(
            "/api",
            routes![
                todo::endpoints::get_todos,
                todo::endpoints::add_todo,
                todo::endpoints::set_todo,
                todo::endpoints::toggle_todo,
                todo::endpoints::delete_todo,
                todo::endpoints::add_step,
                todo::endpoints::set_step,
                todo::endpoints::delete_step,
                todo::endpoints::get_settings,
                todo::endpoints::set_settings,
                roadmap::endpoints::get_roadmap,
                roadmap::endpoints::add_roadmap_item,
                roadmap::endpoints::set_roadmap_item,
                roadmap::endpoints::delete_roadmap_item,
                roadmap::endpoints::get_topics,
                roadmap::endpoints::add_topic,
                roadmap::endpoints::delete_topic,
                endpoints::get_toasts,
            ],
        )
        .mount(
            "/static",
            FileServer::new(&config.static_dir, Options::Index | Options::Missing).rank(15),
        )
        .mount("/", routes![endpoints::page])
        .register(
            "/",
            catchers![
                endpoints::not_found,
                endpoints::bad_request,
                endpoints::unprocessable
            ],
        )
}

/// Boots the application shell while Rocket ignites. Ignition fails, and the
/// launch aborts, when the configuration is invalid or the host page has no
/// mount element.
pub fn shell_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Application Shell", |rocket| async move {
        let config = match AppConfig::from_figment(rocket.figment()) {
            Ok(config) => config,
            Err(e) => {
                log::error!("invalid planner configuration: {}", e);
                return Err(rocket);
            }
        };

        match Shell::boot(&config) {
            Ok(shell) => Ok(mount(rocket.manage(Arc::new(Mutex::new(shell))), &config)),
            Err(e) => {
                log::error!("cannot start the application shell: {}", e);
                Err(rocket)
            }
        }
    })
}

pub fn rocket() -> Rocket<Build> {
    rocket::build().attach(shell_fairing())
}

/// Serves an already constructed shell. Skips the one-time boot.
pub fn rocket_with(config: &AppConfig, shell: Shell) -> Rocket<Build> {
    mount(rocket::build().manage(Arc::new(Mutex::new(shell))), config)
}
