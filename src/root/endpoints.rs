use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{catch, get, Request, Responder, State};
use serde_json::{json, Value};

use std::path::PathBuf;

use crate::data::SharedShell;
use crate::internal_error::InternalResult;
use crate::router::RouteName;
use crate::services::toast::Toast;

#[derive(Responder)]
pub enum PageResponse {
    Redirect(Redirect),
    View(RawHtml<String>),
    #[response(status = 404)]
    NotFound(RawHtml<String>),
}

#[get("/<path..>", rank = 20)]
pub fn page(path: PathBuf, shell: &State<SharedShell>) -> InternalResult<PageResponse> {
    let mut shell = shell.lock()?;

    let requested = format!("/{}", path.to_string_lossy());
    let resolution = shell.navigate(&requested)?;

    if resolution.redirected {
        return Ok(PageResponse::Redirect(Redirect::to(resolution.path)));
    }

    let html = RawHtml(shell.render());
    match resolution.route {
        RouteName::NotFound => Ok(PageResponse::NotFound(html)),
        _ => Ok(PageResponse::View(html)),
    }
}

#[get("/get_toasts")]
pub fn get_toasts(shell: &State<SharedShell>) -> InternalResult<Json<Vec<Toast>>> {
    let mut shell = shell.lock()?;

    Ok(Json(shell.context_mut().services.toasts.drain()))
}

#[catch(404)]
pub fn not_found(request: &Request) -> Json<Value> {
    Json(json!({ "error": format!("nothing at {}", request.uri()) }))
}

#[catch(400)]
pub fn bad_request(request: &Request) -> Json<Value> {
    Json(json!({ "error": format!("malformed request to {}", request.uri()) }))
}

#[catch(422)]
pub fn unprocessable(request: &Request) -> Json<Value> {
    Json(json!({ "error": format!("request body for {} could not be parsed", request.uri()) }))
}
