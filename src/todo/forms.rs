use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use std::collections::HashSet;

use super::data::*;
use crate::data::Priority;
use crate::internal_error::{InternalError, InternalResult};

pub fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct StepForm {
    #[serde(default)]
    #[validate(range(max = 2147483647))]
    pub id: Option<StepID>,
    #[validate(custom(function = "not_blank"))]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl StepForm {
    pub fn new(text: &str) -> StepForm {
        StepForm {
            id: None,
            text: text.to_string(),
            completed: false,
        }
    }
}

/// Input accepted from the todo dialog. Enumerations are checked by serde and the
/// remaining field rules by `validate`, before any `Todo` is built from it.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TodoForm {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub steps: Vec<StepForm>,
}

impl TodoForm {
    pub fn new(text: &str, priority: Priority) -> TodoForm {
        TodoForm {
            text: text.to_string(),
            completed: false,
            due_date: None,
            start_date: None,
            priority,
            description: None,
            steps: vec![],
        }
    }

    pub fn into_todo(self, id: TodoID) -> InternalResult<Todo> {
        self.validate()?;

        Ok(Todo {
            id,
            text: self.text,
            completed: self.completed,
            due_date: self.due_date,
            start_date: self.start_date,
            priority: self.priority,
            description: self.description,
            steps: number_steps(self.steps)?,
        })
    }
}

impl From<&Todo> for TodoForm {
    fn from(todo: &Todo) -> TodoForm {
        TodoForm {
            text: todo.text.clone(),
            completed: todo.completed,
            due_date: todo.due_date,
            start_date: todo.start_date,
            priority: todo.priority,
            description: todo.description.clone(),
            steps: todo
                .steps
                .iter()
                .map(|step| StepForm {
                    id: Some(step.id),
                    text: step.text.clone(),
                    completed: step.completed,
                })
                .collect(),
        }
    }
}

// Keeps submitted step ids when they are unique, numbers the rest after the highest one.
fn number_steps(forms: Vec<StepForm>) -> InternalResult<Vec<TodoStep>> {
    let mut seen = HashSet::new();
    let mut next_id = forms
        .iter()
        .filter_map(|form| form.id)
        .max()
        .unwrap_or(0)
        .max(0);

    forms
        .into_iter()
        .map(|form| {
            let id = match form.id {
                Some(id) if id > 0 && id <= MAX_STEP_ID && seen.insert(id) => id,
                _ => {
                    next_id = match next_id.checked_add(1) {
                        Some(id) if id <= MAX_STEP_ID => id,
                        _ => return Err(InternalError::invalid("step id", format!("after {}", next_id))),
                    };
                    seen.insert(next_id);
                    next_id
                }
            };

            Ok(TodoStep {
                id,
                text: form.text,
                completed: form.completed,
            })
        })
        .collect()
}
