use chrono::Local;

use super::View;
use crate::root::shell::AppContext;
use crate::router::RouteName;
use crate::services::components::{escape, priority_severity, ComponentLibrary};
use crate::todo::data::{Todo, TodoID};

#[derive(Debug, Default)]
pub struct TodoListView {
    overdue: Vec<TodoID>,
}

impl TodoListView {
    pub fn overdue(&self) -> &[TodoID] {
        &self.overdue
    }

    fn view_todo(&self, todo: &Todo, components: &dyn ComponentLibrary) -> String {
        let mut html = format!(
            r#"<li class="todo{}" data-todo-id="{}">"#,
            if todo.completed { " todo-completed" } else { "" },
            todo.id
        );

        html.push_str(&components.checkbox(&todo.text, todo.completed));
        html.push_str(&components.tag(todo.priority.as_str(), priority_severity(todo.priority)));

        if let Some(start) = todo.start_date {
            html.push_str(&format!(r#"<span class="todo-start">from {}</span>"#, start));
        }
        if let Some(due) = todo.due_date {
            html.push_str(&format!(r#"<span class="todo-due">due {}</span>"#, due));
        }
        if self.overdue.contains(&todo.id) {
            html.push_str(&components.tag("overdue", "danger"));
        }
        if let Some(description) = &todo.description {
            html.push_str(&format!(
                r#"<p class="todo-description">{}</p>"#,
                escape(description)
            ));
        }

        if !todo.steps.is_empty() {
            html.push_str(&format!(
                r#"<span class="todo-step-count">{}/{}</span><ol class="todo-steps">"#,
                todo.completed_steps(),
                todo.steps.len()
            ));
            for step in &todo.steps {
                html.push_str(&format!(
                    r#"<li data-step-id="{}">{}</li>"#,
                    step.id,
                    components.checkbox(&step.text, step.completed)
                ));
            }
            html.push_str("</ol>");
        }

        html.push_str(&components.button("Edit", &format!("edit-todo:{}", todo.id)));
        html.push_str(&components.button("Delete", &format!("delete-todo:{}", todo.id)));
        html.push_str("</li>");

        html
    }
}

impl View for TodoListView {
    fn route(&self) -> RouteName {
        RouteName::Todos
    }

    fn mount(&mut self, context: &mut AppContext) {
        let today = Local::now().date_naive();

        self.overdue = context
            .todos
            .list()
            .iter()
            .filter(|todo| todo.is_overdue(today))
            .map(|todo| todo.id)
            .collect();

        if !self.overdue.is_empty() {
            context.services.toasts.warn(
                "Overdue",
                format!("{} todo(s) are past their due date", self.overdue.len()),
            );
        }
    }

    fn unmount(&mut self, _context: &mut AppContext) {
        self.overdue.clear();
    }

    fn render(&self, context: &AppContext) -> String {
        let components = context.services.components.as_ref();
        let todos = context.todos.list();
        let open = todos.iter().filter(|todo| !todo.completed).count();

        let mut html = format!(
            r#"<div class="todo-list"><header><h1>Todos</h1><span class="todo-count">{} open, {} done</span>{}</header>"#,
            open,
            todos.len() - open,
            components.button("Add todo", "add-todo")
        );

        if todos.is_empty() {
            html.push_str(r#"<p class="empty">Nothing to do.</p>"#);
        } else {
            html.push_str("<ul>");
            for todo in todos {
                html.push_str(&self.view_todo(todo, components));
            }
            html.push_str("</ul>");
        }

        html.push_str("</div>");
        html
    }
}
