use serde::{Deserialize, Serialize};
use validator::Validate;

use super::data::*;
use crate::data::Priority;
use crate::internal_error::InternalResult;
use crate::todo::forms::not_blank;

/// Roadmap item as submitted by the roadmap view. `quarter` stays a plain integer
/// here so an out-of-range value is reported as such rather than as a parse error.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct RoadmapItemForm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub quarter: i64,
    #[validate(range(min = 1970, max = 9999))]
    pub year: i32,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub progress: f64,
}

impl RoadmapItemForm {
    pub fn new(title: &str, quarter: i64, year: i32) -> RoadmapItemForm {
        RoadmapItemForm {
            title: title.to_string(),
            description: String::new(),
            quarter,
            year,
            topic: String::new(),
            status: Status::default(),
            priority: Priority::default(),
            progress: 0.0,
        }
    }

    pub fn into_item(self, id: RoadmapItemID) -> InternalResult<RoadmapItem> {
        let quarter = Quarter::try_from(self.quarter)?;
        self.validate()?;

        Ok(RoadmapItem {
            id,
            title: self.title,
            description: self.description,
            quarter,
            year: self.year,
            topic: self.topic,
            status: self.status,
            priority: self.priority,
            progress: self.progress,
        })
    }
}

impl From<&RoadmapItem> for RoadmapItemForm {
    fn from(item: &RoadmapItem) -> RoadmapItemForm {
        RoadmapItemForm {
            title: item.title.clone(),
            description: item.description.clone(),
            quarter: item.quarter.get() as i64,
            year: item.year,
            topic: item.topic.clone(),
            status: item.status,
            priority: item.priority,
            progress: item.progress,
        }
    }
}

impl RoadmapItem {
    /// Validating constructor for a roadmap item.
    pub fn new(id: RoadmapItemID, form: RoadmapItemForm) -> InternalResult<RoadmapItem> {
        form.into_item(id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct TopicForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    pub color: String,
}

impl TopicForm {
    pub fn into_topic(self, id: TopicID) -> InternalResult<Topic> {
        self.validate()?;

        Ok(Topic {
            id,
            name: self.name,
            description: self.description,
            color: self.color,
        })
    }
}
