pub mod data;
pub mod endpoints;
pub mod forms;
pub mod store;
