use rocket::serde::json::Json;
use rocket::{get, post, State};
use serde::{Deserialize, Serialize};

use crate::data::SharedShell;
use crate::internal_error::InternalResult;

use super::data::*;
use super::forms::{StepForm, TodoForm};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddTodoResult {
    pub todo_id: TodoID,
    pub removed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetTodoRequest {
    pub todo_id: TodoID,
    pub todo: TodoForm,
}

/// `removed` is set when auto-delete purged the todo as soon as it was saved.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetTodoResult {
    pub todo: Todo,
    pub removed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTodoRequest {
    pub todo_id: TodoID,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTodoResult {
    pub removed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTodoRequest {
    pub todo_id: TodoID,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddStepRequest {
    pub todo_id: TodoID,
    pub step: StepForm,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddStepResult {
    pub step_id: StepID,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetStepRequest {
    pub todo_id: TodoID,
    pub step_id: StepID,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStepRequest {
    pub todo_id: TodoID,
    pub step_id: StepID,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetSettingsResult {
    pub purged: Vec<TodoID>,
}

#[get("/get_todos")]
pub fn get_todos(shell: &State<SharedShell>) -> InternalResult<Json<Vec<Todo>>> {
    let shell = shell.lock()?;

    Ok(Json(shell.context().todos.list().to_vec()))
}

#[post("/add_todo", format = "json", data = "<todo>")]
pub fn add_todo(
    todo: Json<TodoForm>,
    shell: &State<SharedShell>,
) -> InternalResult<Json<AddTodoResult>> {
    let mut shell = shell.lock()?;
    let context = shell.context_mut();

    let todo = context.todos.add(todo.into_inner())?;
    let removed = context.todos.get(todo.id).is_none();
    if !removed {
        context.services.toasts.success("Todo added", todo.text.clone());
    }

    Ok(Json(AddTodoResult {
        todo_id: todo.id,
        removed,
    }))
}

#[post("/set_todo", format = "json", data = "<set_todo_request>")]
pub fn set_todo(
    set_todo_request: Json<SetTodoRequest>,
    shell: &State<SharedShell>,
) -> InternalResult<Json<SetTodoResult>> {
    let mut shell = shell.lock()?;
    let SetTodoRequest { todo_id, todo } = set_todo_request.into_inner();

    let todos = &mut shell.context_mut().todos;
    let todo = todos.update(todo_id, todo)?;
    let removed = todos.get(todo_id).is_none();

    Ok(Json(SetTodoResult { todo, removed }))
}

#[post("/toggle_todo", format = "json", data = "<toggle_todo_request>")]
pub fn toggle_todo(
    toggle_todo_request: Json<ToggleTodoRequest>,
    shell: &State<SharedShell>,
) -> InternalResult<Json<ToggleTodoResult>> {
    let mut shell = shell.lock()?;

    let kept = shell
        .context_mut()
        .todos
        .set_completed(toggle_todo_request.todo_id, toggle_todo_request.completed)?;

    Ok(Json(ToggleTodoResult { removed: !kept }))
}

#[post("/delete_todo", format = "json", data = "<delete_todo_request>")]
pub fn delete_todo(
    delete_todo_request: Json<DeleteTodoRequest>,
    shell: &State<SharedShell>,
) -> InternalResult<()> {
    let mut shell = shell.lock()?;
    let context = shell.context_mut();

    let todo = context.todos.remove(delete_todo_request.todo_id)?;
    context.services.toasts.success("Todo deleted", todo.text);

    Ok(())
}

#[post("/add_step", format = "json", data = "<add_step_request>")]
pub fn add_step(
    add_step_request: Json<AddStepRequest>,
    shell: &State<SharedShell>,
) -> InternalResult<Json<AddStepResult>> {
    let mut shell = shell.lock()?;
    let AddStepRequest { todo_id, step } = add_step_request.into_inner();

    let step = shell.context_mut().todos.add_step(todo_id, step)?;

    Ok(Json(AddStepResult { step_id: step.id }))
}

#[post("/set_step", format = "json", data = "<set_step_request>")]
pub fn set_step(
    set_step_request: Json<SetStepRequest>,
    shell: &State<SharedShell>,
) -> InternalResult<()> {
    let mut shell = shell.lock()?;

    shell.context_mut().todos.set_step_completed(
        set_step_request.todo_id,
        set_step_request.step_id,
        set_step_request.completed,
    )
}

#[post("/delete_step", format = "json", data = "<delete_step_request>")]
pub fn delete_step(
    delete_step_request: Json<DeleteStepRequest>,
    shell: &State<SharedShell>,
) -> InternalResult<()> {
    let mut shell = shell.lock()?;

    shell
        .context_mut()
        .todos
        .remove_step(delete_step_request.todo_id, delete_step_request.step_id)?;

    Ok(())
}

#[get("/get_settings")]
pub fn get_settings(shell: &State<SharedShell>) -> InternalResult<Json<Settings>> {
    let shell = shell.lock()?;

    Ok(Json(shell.context().settings))
}

#[post("/set_settings", format = "json", data = "<settings>")]
pub fn set_settings(
    settings: Json<Settings>,
    shell: &State<SharedShell>,
) -> InternalResult<Json<SetSettingsResult>> {
    let mut shell = shell.lock()?;

    let purged = shell.context_mut().update_settings(settings.into_inner());

    Ok(Json(SetSettingsResult { purged }))
}
