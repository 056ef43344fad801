use planboard::config::AppConfig;
use planboard::roadmap::data::RoadmapItem;
use planboard::root::shell::Shell;
use planboard::services::toast::{Severity, Toast};
use planboard::todo::data::{Settings, Theme, Todo};
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

const PAGE: &str = r#"<!DOCTYPE html><html><body><div id="app"></div></body></html>"#;

fn client() -> Client {
    let config = AppConfig::default();
    let shell = Shell::new(&config, PAGE).expect("host page has a mount target");

    Client::tracked(planboard::rocket_with(&config, shell)).expect("valid rocket instance")
}

fn post(client: &Client, uri: &str, body: Value) -> (Status, Value) {
    let response = client
        .post(uri)
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch();
    let status = response.status();
    let body = response
        .into_string()
        .filter(|body| !body.is_empty())
        .map(|body| serde_json::from_str(&body).expect("json body"))
        .unwrap_or(Value::Null);

    (status, body)
}

fn todos(client: &Client) -> Vec<Todo> {
    client
        .get("/api/get_todos")
        .dispatch()
        .into_json()
        .expect("todo list")
}

#[test]
fn root_redirects_to_todos() {
    let client = client();
    let response = client.get("/").dispatch();

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/todos"));
}

#[test]
fn pages_mount_their_view() {
    let client = client();

    let todos = client.get("/todos").dispatch();
    assert_eq!(todos.status(), Status::Ok);
    assert_eq!(todos.content_type(), Some(ContentType::HTML));
    assert!(todos.into_string().unwrap().contains(r#"data-route="todos""#));

    let roadmap = client.get("/roadmap").dispatch();
    assert_eq!(roadmap.status(), Status::Ok);
    let html = roadmap.into_string().unwrap();
    assert!(html.contains(r#"data-route="roadmap""#));
    assert!(!html.contains(r#"data-route="todos""#));
}

#[test]
fn unknown_page_renders_not_found() {
    let client = client();
    let response = client.get("/settings").dispatch();

    assert_eq!(response.status(), Status::NotFound);
    assert!(response.into_string().unwrap().contains("Page not found"));
}

#[test]
fn static_assets_are_served() {
    let client = client();
    let response = client.get("/static/style.css").dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::CSS));
}

#[test]
fn created_todo_is_retrievable() {
    let client = client();
    let (status, body) = post(
        &client,
        "/api/add_todo",
        json!({ "text": "Buy milk", "completed": false, "priority": "medium", "steps": [] }),
    );

    assert_eq!(status, Status::Ok);
    assert_eq!(body["todoId"], 1);

    let todos = todos(&client);
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "Buy milk");
    assert!(todos[0].steps.is_empty());
    assert!(!todos[0].completed);
    assert_eq!(todos[0].description, None);
}

#[test]
fn out_of_set_priority_is_rejected() {
    let client = client();
    let (status, _) = post(
        &client,
        "/api/add_todo",
        json!({ "text": "Buy milk", "priority": "urgent" }),
    );

    assert!(status.class().is_client_error());
    assert!(todos(&client).is_empty());
}

#[test]
fn blank_text_reports_the_field() {
    let client = client();
    let (status, body) = post(&client, "/api/add_todo", json!({ "text": "  " }));

    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(body["fields"], json!(["text"]));
}

#[test]
fn steps_keep_their_order_through_the_api() {
    let client = client();
    post(&client, "/api/add_todo", json!({ "text": "Move" }));
    for text in ["pack", "load", "unload"] {
        let (status, _) = post(
            &client,
            "/api/add_step",
            json!({ "todoId": 1, "step": { "text": text } }),
        );
        assert_eq!(status, Status::Ok);
    }

    let (status, _) = post(
        &client,
        "/api/set_step",
        json!({ "todoId": 1, "stepId": 2, "completed": true }),
    );
    assert_eq!(status, Status::Ok);
    let (status, _) = post(&client, "/api/delete_step", json!({ "todoId": 1, "stepId": 1 }));
    assert_eq!(status, Status::Ok);

    let steps: Vec<(String, bool)> = todos(&client)[0]
        .steps
        .iter()
        .map(|step| (step.text.clone(), step.completed))
        .collect();
    assert_eq!(
        steps,
        vec![("load".to_string(), true), ("unload".to_string(), false)]
    );
}

#[test]
fn editing_and_deleting_unknown_todos_is_not_found() {
    let client = client();

    let (status, body) = post(
        &client,
        "/api/set_todo",
        json!({ "todoId": 42, "todo": { "text": "Ghost" } }),
    );
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["error"], "todo 42 not found");

    let (status, _) = post(&client, "/api/delete_todo", json!({ "todoId": 42 }));
    assert_eq!(status, Status::NotFound);
}

#[test]
fn auto_delete_setting_purges_completed_todos() {
    let client = client();
    post(&client, "/api/add_todo", json!({ "text": "Done" }));
    post(&client, "/api/add_todo", json!({ "text": "Open" }));

    let (status, body) = post(
        &client,
        "/api/toggle_todo",
        json!({ "todoId": 1, "completed": true }),
    );
    assert_eq!(status, Status::Ok);
    assert_eq!(body["removed"], false);

    let (status, body) = post(
        &client,
        "/api/set_settings",
        json!({ "theme": "ocean", "autoDeleteCompleted": true }),
    );
    assert_eq!(status, Status::Ok);
    assert_eq!(body["purged"], json!([1]));

    let settings: Settings = client.get("/api/get_settings").dispatch().into_json().unwrap();
    assert_eq!(settings.theme, Theme::Ocean);

    let (_, body) = post(
        &client,
        "/api/toggle_todo",
        json!({ "todoId": 2, "completed": true }),
    );
    assert_eq!(body["removed"], true);
    assert!(todos(&client).is_empty());

    let (status, _) = post(
        &client,
        "/api/set_settings",
        json!({ "theme": "neon", "autoDeleteCompleted": false }),
    );
    assert!(status.class().is_client_error());
}

#[test]
fn roadmap_quarter_out_of_range_is_rejected() {
    let client = client();
    let (status, body) = post(
        &client,
        "/api/add_roadmap_item",
        json!({ "title": "Launch", "quarter": 5, "year": 2025 }),
    );

    assert_eq!(status, Status::UnprocessableEntity);
    assert!(body["error"].as_str().unwrap().contains("quarter 5"));

    let items: Vec<RoadmapItem> = client.get("/api/get_roadmap").dispatch().into_json().unwrap();
    assert!(items.is_empty());
}

#[test]
fn roadmap_items_and_topics_round_trip() {
    let client = client();
    let (status, body) = post(
        &client,
        "/api/add_topic",
        json!({ "name": "Platform", "description": "Core", "color": "#4caf50" }),
    );
    assert_eq!(status, Status::Ok);
    assert_eq!(body["topicId"], 1);

    for (title, quarter, year) in [("Sync", 1, 2025), ("Search", 2, 2026)] {
        let (status, _) = post(
            &client,
            "/api/add_roadmap_item",
            json!({
                "title": title,
                "description": "",
                "quarter": quarter,
                "year": year,
                "topic": "Platform",
                "status": "in-progress",
                "priority": "high",
                "progress": 30
            }),
        );
        assert_eq!(status, Status::Ok);
    }

    let items: Vec<RoadmapItem> = client
        .get("/api/get_roadmap?year=2026")
        .dispatch()
        .into_json()
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Search");

    let (status, _) = post(
        &client,
        "/api/set_roadmap_item",
        json!({ "itemId": 1, "item": { "title": "Sync", "quarter": 2, "year": 2025, "status": "completed", "progress": 100 } }),
    );
    assert_eq!(status, Status::Ok);

    let (status, _) = post(
        &client,
        "/api/add_roadmap_item",
        json!({ "title": "Bad", "quarter": 1, "year": 2025, "status": "done" }),
    );
    assert!(status.class().is_client_error());

    let html = client.get("/roadmap").dispatch().into_string().unwrap();
    assert!(html.contains("Search"));
    assert!(html.contains("Q1 2026"));

    let (status, _) = post(&client, "/api/delete_topic", json!({ "topicId": 1 }));
    assert_eq!(status, Status::Ok);
    let (status, _) = post(&client, "/api/delete_roadmap_item", json!({ "itemId": 1 }));
    assert_eq!(status, Status::Ok);
    let (status, _) = post(&client, "/api/delete_roadmap_item", json!({ "itemId": 1 }));
    assert_eq!(status, Status::NotFound);
}

#[test]
fn mutations_queue_toasts() {
    let client = client();
    post(&client, "/api/add_todo", json!({ "text": "Buy milk" }));

    let toasts: Vec<Toast> = client.get("/api/get_toasts").dispatch().into_json().unwrap();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, Severity::Success);
    assert_eq!(toasts[0].detail, "Buy milk");

    let toasts: Vec<Toast> = client.get("/api/get_toasts").dispatch().into_json().unwrap();
    assert!(toasts.is_empty());
}

#[test]
fn oversized_step_ids_are_rejected_without_breaking_the_service() {
    let client = client();
    let (status, body) = post(
        &client,
        "/api/add_todo",
        json!({
            "text": "Pack",
            "steps": [{ "id": 9223372036854775807i64, "text": "tent" }, { "text": "stove" }]
        }),
    );
    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(body["fields"], json!(["steps"]));

    let response = client.get("/api/get_todos").dispatch();
    assert_eq!(response.status(), Status::Ok);

    let (status, _) = post(&client, "/api/add_todo", json!({ "text": "Pack" }));
    assert_eq!(status, Status::Ok);
    assert_eq!(todos(&client).len(), 1);
}

#[test]
fn saving_a_completed_todo_under_auto_delete_reports_removal() {
    let client = client();
    post(
        &client,
        "/api/set_settings",
        json!({ "theme": "default", "autoDeleteCompleted": true }),
    );
    client.get("/api/get_toasts").dispatch();

    let (status, body) = post(
        &client,
        "/api/add_todo",
        json!({ "text": "Done already", "completed": true }),
    );
    assert_eq!(status, Status::Ok);
    assert_eq!(body["removed"], true);
    assert!(todos(&client).is_empty());

    let toasts: Vec<Toast> = client.get("/api/get_toasts").dispatch().into_json().unwrap();
    assert!(toasts.is_empty());

    let (_, body) = post(&client, "/api/add_todo", json!({ "text": "Open" }));
    assert_eq!(body["removed"], false);
    let todo_id = body["todoId"].clone();

    let (status, body) = post(
        &client,
        "/api/set_todo",
        json!({ "todoId": todo_id, "todo": { "text": "Open", "completed": true } }),
    );
    assert_eq!(status, Status::Ok);
    assert_eq!(body["removed"], true);
    assert_eq!(body["todo"]["completed"], true);
    assert!(todos(&client).is_empty());
}
