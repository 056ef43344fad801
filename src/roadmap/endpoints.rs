use rocket::serde::json::Json;
use rocket::{get, post, State};
use serde::{Deserialize, Serialize};

use crate::data::SharedShell;
use crate::internal_error::InternalResult;

use super::data::*;
use super::forms::{RoadmapItemForm, TopicForm};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddRoadmapItemResult {
    pub item_id: RoadmapItemID,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetRoadmapItemRequest {
    pub item_id: RoadmapItemID,
    pub item: RoadmapItemForm,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRoadmapItemRequest {
    pub item_id: RoadmapItemID,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddTopicResult {
    pub topic_id: TopicID,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTopicRequest {
    pub topic_id: TopicID,
}

#[get("/get_roadmap?<year>")]
pub fn get_roadmap(
    year: Option<i32>,
    shell: &State<SharedShell>,
) -> InternalResult<Json<Vec<RoadmapItem>>> {
    let shell = shell.lock()?;

    let items: Vec<RoadmapItem> = shell
        .context()
        .roadmap
        .list()
        .iter()
        .filter(|item| year.map_or(true, |year| item.year == year))
        .cloned()
        .collect();

    Ok(Json(items))
}

#[post("/add_roadmap_item", format = "json", data = "<item>")]
pub fn add_roadmap_item(
    item: Json<RoadmapItemForm>,
    shell: &State<SharedShell>,
) -> InternalResult<Json<AddRoadmapItemResult>> {
    let mut shell = shell.lock()?;
    let context = shell.context_mut();

    let item = context.roadmap.add(item.into_inner())?;
    context
        .services
        .toasts
        .success("Roadmap item added", format!("{} ({} {})", item.title, item.quarter, item.year));

    Ok(Json(AddRoadmapItemResult { item_id: item.id }))
}

#[post("/set_roadmap_item", format = "json", data = "<set_roadmap_item_request>")]
pub fn set_roadmap_item(
    set_roadmap_item_request: Json<SetRoadmapItemRequest>,
    shell: &State<SharedShell>,
) -> InternalResult<Json<RoadmapItem>> {
    let mut shell = shell.lock()?;
    let SetRoadmapItemRequest { item_id, item } = set_roadmap_item_request.into_inner();

    let item = shell.context_mut().roadmap.update(item_id, item)?;

    Ok(Json(item))
}

#[post("/delete_roadmap_item", format = "json", data = "<delete_roadmap_item_request>")]
pub fn delete_roadmap_item(
    delete_roadmap_item_request: Json<DeleteRoadmapItemRequest>,
    shell: &State<SharedShell>,
) -> InternalResult<()> {
    let mut shell = shell.lock()?;

    shell
        .context_mut()
        .roadmap
        .remove(delete_roadmap_item_request.item_id)?;

    Ok(())
}

#[get("/get_topics")]
pub fn get_topics(shell: &State<SharedShell>) -> InternalResult<Json<Vec<Topic>>> {
    let shell = shell.lock()?;

    Ok(Json(shell.context().roadmap.topics().to_vec()))
}

#[post("/add_topic", format = "json", data = "<topic>")]
pub fn add_topic(
    topic: Json<TopicForm>,
    shell: &State<SharedShell>,
) -> InternalResult<Json<AddTopicResult>> {
    let mut shell = shell.lock()?;

    let topic = shell.context_mut().roadmap.add_topic(topic.into_inner())?;

    Ok(Json(AddTopicResult { topic_id: topic.id }))
}

#[post("/delete_topic", format = "json", data = "<delete_topic_request>")]
pub fn delete_topic(
    delete_topic_request: Json<DeleteTopicRequest>,
    shell: &State<SharedShell>,
) -> InternalResult<()> {
    let mut shell = shell.lock()?;

    shell
        .context_mut()
        .roadmap
        .remove_topic(delete_topic_request.topic_id)?;

    Ok(())
}
