pub mod endpoints;
pub mod shell;
