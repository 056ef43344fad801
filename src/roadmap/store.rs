use log::{debug, info};

use std::collections::{BTreeMap, BTreeSet};

use super::data::*;
use super::forms::{RoadmapItemForm, TopicForm};
use crate::internal_error::{InternalError, InternalResult};

#[derive(Debug)]
pub struct RoadmapStore {
    items: Vec<RoadmapItem>,
    topics: Vec<Topic>,
    next_item_id: RoadmapItemID,
    next_topic_id: TopicID,
}

impl Default for RoadmapStore {
    fn default() -> Self {
        RoadmapStore::new()
    }
}

impl RoadmapStore {
    pub fn new() -> RoadmapStore {
        RoadmapStore {
            items: vec![],
            topics: vec![],
            next_item_id: 1,
            next_topic_id: 1,
        }
    }

    pub fn list(&self) -> &[RoadmapItem] {
        &self.items
    }

    pub fn get(&self, id: RoadmapItemID) -> Option<&RoadmapItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn position(&self, id: RoadmapItemID) -> InternalResult<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| InternalError::not_found("roadmap item", id))
    }

    pub fn add(&mut self, form: RoadmapItemForm) -> InternalResult<RoadmapItem> {
        let item = form.into_item(self.next_item_id)?;

        self.next_item_id += 1;
        self.items.push(item.clone());
        info!("added roadmap item {} for {} {}", item.id, item.quarter, item.year);

        Ok(item)
    }

    /// Stores an item whose id was assigned by the caller.
    pub fn insert(&mut self, item: RoadmapItem) -> InternalResult<()> {
        RoadmapItemForm::from(&item).into_item(item.id)?;

        if self.get(item.id).is_some() {
            return Err(InternalError::Conflict {
                what: "roadmap item",
                id: item.id,
            });
        }

        self.next_item_id = self.next_item_id.max(item.id + 1);
        self.items.push(item);

        Ok(())
    }

    pub fn update(&mut self, id: RoadmapItemID, form: RoadmapItemForm) -> InternalResult<RoadmapItem> {
        let position = self.position(id)?;
        let item = form.into_item(id)?;

        self.items[position] = item.clone();
        debug!("updated roadmap item {}", id);

        Ok(item)
    }

    pub fn remove(&mut self, id: RoadmapItemID) -> InternalResult<RoadmapItem> {
        let position = self.position(id)?;
        info!("removed roadmap item {}", id);

        Ok(self.items.remove(position))
    }

    /// Items of one year grouped by quarter. All four quarters are present, in order.
    pub fn by_quarter(&self, year: i32) -> BTreeMap<Quarter, Vec<&RoadmapItem>> {
        let mut quarters: BTreeMap<Quarter, Vec<&RoadmapItem>> =
            Quarter::ALL.iter().map(|quarter| (*quarter, vec![])).collect();

        for item in self.items.iter().filter(|item| item.year == year) {
            if let Some(items) = quarters.get_mut(&item.quarter) {
                items.push(item);
            }
        }

        quarters
    }

    pub fn years(&self) -> BTreeSet<i32> {
        self.items.iter().map(|item| item.year).collect()
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn add_topic(&mut self, form: TopicForm) -> InternalResult<Topic> {
        let topic = form.into_topic(self.next_topic_id)?;

        self.next_topic_id += 1;
        self.topics.push(topic.clone());
        info!("added topic {} `{}`", topic.id, topic.name);

        Ok(topic)
    }

    /// Items keep their topic label when the topic is removed.
    pub fn remove_topic(&mut self, id: TopicID) -> InternalResult<Topic> {
        let position = self
            .topics
            .iter()
            .position(|topic| topic.id == id)
            .ok_or_else(|| InternalError::not_found("topic", id))?;

        Ok(self.topics.remove(position))
    }

    pub fn topic_for(&self, item: &RoadmapItem) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.name == item.topic)
    }

    /// Topic labels used by items that match no defined topic.
    pub fn unknown_topics(&self) -> BTreeSet<&str> {
        self.items
            .iter()
            .filter(|item| !item.topic.is_empty() && self.topic_for(item).is_none())
            .map(|item| item.topic.as_str())
            .collect()
    }
}
