use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::data::Priority;
use crate::internal_error::{InternalError, InternalResult};

pub type TodoID = i64;
pub type StepID = i64;

/// Highest step id a todo may hold, submitted or assigned.
pub const MAX_STEP_ID: StepID = 2_147_483_647;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoStep {
    pub id: StepID,
    pub text: String,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoID,
    pub text: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<TodoStep>,
}

impl Todo {
    /// Builds a todo with no dates, description or steps. The label must not be blank.
    pub fn new(id: TodoID, text: &str, priority: Priority) -> InternalResult<Todo> {
        if text.trim().is_empty() {
            return Err(InternalError::invalid("todo text", text));
        }

        Ok(Todo {
            id,
            text: text.to_string(),
            completed: false,
            due_date: None,
            start_date: None,
            priority,
            description: None,
            steps: vec![],
        })
    }

    pub fn step(&self, step_id: StepID) -> Option<&TodoStep> {
        self.steps.iter().find(|step| step.id == step_id)
    }

    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|step| step.completed).count()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.map_or(false, |due| due < today)
    }

    pub(crate) fn next_step_id(&self) -> InternalResult<StepID> {
        let highest = self.steps.iter().map(|step| step.id).max().unwrap_or(0);

        match highest.checked_add(1) {
            Some(id) if id <= MAX_STEP_ID => Ok(id),
            _ => Err(InternalError::invalid("step id", format!("after {}", highest))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Default,
    Sunset,
    Ocean,
    Forest,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Sunset, Theme::Ocean, Theme::Forest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Sunset => "sunset",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Default
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Theme, InternalError> {
        Theme::ALL
            .iter()
            .find(|theme| theme.as_str() == s)
            .copied()
            .ok_or_else(|| InternalError::invalid("theme", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub auto_delete_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy_milk() -> Todo {
        Todo::new(1, "Buy milk", Priority::Medium).unwrap()
    }

    #[test]
    fn new_todo_starts_open_and_empty() {
        let todo = buy_milk();

        assert_eq!(todo.id, 1);
        assert!(!todo.completed);
        assert!(todo.steps.is_empty());
        assert_eq!(todo.description, None);
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(Todo::new(1, "", Priority::Low).is_err());
        assert!(Todo::new(1, "   ", Priority::Low).is_err());
    }

    #[test]
    fn absent_optionals_are_omitted_and_empty_strings_kept() {
        let mut todo = buy_milk();
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("dueDate").is_none());

        todo.description = Some(String::new());
        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.description, Some(String::new()));
    }

    #[test]
    fn step_order_survives_json() {
        let mut todo = buy_milk();
        for (id, text) in [(3, "walk"), (1, "pay"), (2, "carry")] {
            todo.steps.push(TodoStep {
                id,
                text: text.to_string(),
                completed: id == 1,
            });
        }

        let back: Todo = serde_json::from_str(&serde_json::to_string(&todo).unwrap()).unwrap();
        let ids: Vec<StepID> = back.steps.iter().map(|step| step.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(back.next_step_id().unwrap(), 4);
        assert_eq!(back.completed_steps(), 1);
    }

    #[test]
    fn wire_format_uses_camel_case_dates() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":4,"text":"File taxes","completed":false,"dueDate":"2025-04-15","priority":"high","steps":[]}"#,
        )
        .unwrap();

        assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2025, 4, 15));
        assert!(todo.is_overdue(NaiveDate::from_ymd_opt(2025, 4, 16).unwrap()));
        assert!(!todo.is_overdue(NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()));
    }

    #[test]
    fn settings_round_trip_and_reject_unknown_themes() {
        let settings: Settings =
            serde_json::from_str(r#"{"theme":"ocean","autoDeleteCompleted":true}"#).unwrap();
        assert_eq!(settings.theme, Theme::Ocean);
        assert!(settings.auto_delete_completed);

        assert!(serde_json::from_str::<Settings>(r#"{"theme":"neon","autoDeleteCompleted":false}"#).is_err());
        assert!("neon".parse::<Theme>().is_err());
        assert_eq!("forest".parse::<Theme>().unwrap(), Theme::Forest);
    }
}
