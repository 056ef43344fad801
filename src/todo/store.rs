use log::{debug, info};
use validator::Validate;

use std::collections::HashSet;

use super::data::*;
use super::forms::{StepForm, TodoForm};
use crate::internal_error::{InternalError, InternalResult};

/// In-memory owner of every todo. Keeps todos in insertion order and enacts the
/// auto-delete policy from `Settings`.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: TodoID,
    auto_delete_completed: bool,
}

impl TodoStore {
    pub fn new() -> TodoStore {
        TodoStore {
            todos: vec![],
            next_id: 1,
            auto_delete_completed: false,
        }
    }

    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: TodoID) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    fn get_mut(&mut self, id: TodoID) -> InternalResult<&mut Todo> {
        self.todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| InternalError::not_found("todo", id))
    }

    fn position(&self, id: TodoID) -> InternalResult<usize> {
        self.todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or_else(|| InternalError::not_found("todo", id))
    }

    /// Validates the form and stores it under the next free id.
    pub fn add(&mut self, form: TodoForm) -> InternalResult<Todo> {
        let id = self.next_id.max(1);
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| InternalError::invalid("todo id", id.to_string()))?;
        let todo = form.into_todo(id)?;

        self.next_id = next_id;
        self.todos.push(todo.clone());
        info!("added todo {} ({} steps)", id, todo.steps.len());

        self.enforce_auto_delete();
        Ok(todo)
    }

    /// Stores a todo whose id was assigned by the caller.
    pub fn insert(&mut self, todo: Todo) -> InternalResult<()> {
        TodoForm::from(&todo).validate()?;

        if self.get(todo.id).is_some() {
            return Err(InternalError::Conflict {
                what: "todo",
                id: todo.id,
            });
        }

        let mut step_ids = HashSet::new();
        if let Some(step) = todo.steps.iter().find(|step| !step_ids.insert(step.id)) {
            return Err(InternalError::Conflict {
                what: "step",
                id: step.id,
            });
        }

        let next_id = todo
            .id
            .checked_add(1)
            .ok_or_else(|| InternalError::invalid("todo id", todo.id.to_string()))?;

        self.next_id = self.next_id.max(next_id);
        debug!("inserted todo {}", todo.id);
        self.todos.push(todo);

        self.enforce_auto_delete();
        Ok(())
    }

    /// Replaces every editable field of a todo, keeping its id and position.
    pub fn update(&mut self, id: TodoID, form: TodoForm) -> InternalResult<Todo> {
        let position = self.position(id)?;
        let todo = form.into_todo(id)?;

        self.todos[position] = todo.clone();
        debug!("updated todo {}", id);

        self.enforce_auto_delete();
        Ok(todo)
    }

    /// Returns whether the todo is still stored afterwards.
    pub fn set_completed(&mut self, id: TodoID, completed: bool) -> InternalResult<bool> {
        self.get_mut(id)?.completed = completed;
        debug!("todo {} completed={}", id, completed);

        Ok(!self.enforce_auto_delete().contains(&id))
    }

    pub fn remove(&mut self, id: TodoID) -> InternalResult<Todo> {
        let position = self.position(id)?;
        info!("removed todo {}", id);

        Ok(self.todos.remove(position))
    }

    pub fn add_step(&mut self, id: TodoID, form: StepForm) -> InternalResult<TodoStep> {
        form.validate()?;

        let todo = self.get_mut(id)?;
        let step = TodoStep {
            id: todo.next_step_id()?,
            text: form.text,
            completed: form.completed,
        };
        todo.steps.push(step.clone());

        Ok(step)
    }

    pub fn set_step_completed(
        &mut self,
        id: TodoID,
        step_id: StepID,
        completed: bool,
    ) -> InternalResult<()> {
        let step = self
            .get_mut(id)?
            .steps
            .iter_mut()
            .find(|step| step.id == step_id)
            .ok_or_else(|| InternalError::not_found("step", step_id))?;

        step.completed = completed;
        Ok(())
    }

    pub fn remove_step(&mut self, id: TodoID, step_id: StepID) -> InternalResult<TodoStep> {
        let todo = self.get_mut(id)?;
        let position = todo
            .steps
            .iter()
            .position(|step| step.id == step_id)
            .ok_or_else(|| InternalError::not_found("step", step_id))?;

        Ok(todo.steps.remove(position))
    }

    /// Removes every completed todo and returns their ids.
    pub fn purge_completed(&mut self) -> Vec<TodoID> {
        let purged: Vec<TodoID> = self
            .todos
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| todo.id)
            .collect();

        if !purged.is_empty() {
            self.todos.retain(|todo| !todo.completed);
            info!("purged {} completed todos", purged.len());
        }

        purged
    }

    pub fn auto_delete_completed(&self) -> bool {
        self.auto_delete_completed
    }

    /// Turning auto-delete on purges the todos that are already completed.
    pub fn apply_settings(&mut self, settings: &Settings) -> Vec<TodoID> {
        self.auto_delete_completed = settings.auto_delete_completed;
        self.enforce_auto_delete()
    }

    fn enforce_auto_delete(&mut self) -> Vec<TodoID> {
        if self.auto_delete_completed {
            self.purge_completed()
        } else {
            vec![]
        }
    }
}
