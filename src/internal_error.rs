use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, status::Custom, Responder};
use rocket::serde::json::Json;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use std::io;
use std::path::PathBuf;
use std::sync::PoisonError;

#[derive(Error, Debug)]
pub enum InternalError {
    #[error("invalid {kind} `{value}`")]
    InvalidValue { kind: &'static str, value: String },

    #[error("quarter {0} is out of range, expected 1 to 4")]
    QuarterOutOfRange(i64),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: i64 },

    #[error("{what} {id} already exists")]
    Conflict { what: &'static str, id: i64 },

    #[error("mount target `#{target}` not found in host page {}", .page.display())]
    MountTargetMissing { target: String, page: PathBuf },

    #[error("application shell has already been booted")]
    AlreadyBooted,

    #[error("redirect loop while resolving `{0}`")]
    RedirectLoop(String),

    #[error("configuration error: {0}")]
    Config(#[from] rocket::figment::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("shell lock poisoned: {0}")]
    Poisoned(String),
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Poisoned(e.to_string())
    }
}

impl InternalError {
    pub fn invalid(kind: &'static str, value: impl Into<String>) -> InternalError {
        InternalError::InvalidValue {
            kind,
            value: value.into(),
        }
    }

    pub fn not_found(what: &'static str, id: i64) -> InternalError {
        InternalError::NotFound { what, id }
    }

    pub fn status(&self) -> Status {
        match self {
            InternalError::InvalidValue { .. }
            | InternalError::QuarterOutOfRange(_)
            | InternalError::Validation(_) => Status::UnprocessableEntity,
            InternalError::NotFound { .. } => Status::NotFound,
            InternalError::Conflict { .. } => Status::Conflict,
            _ => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();

        if status == Status::InternalServerError {
            log::error!("{} {} failed: {}", request.method(), request.uri(), self);
        } else {
            log::debug!("{} {} rejected: {}", request.method(), request.uri(), self);
        }

        let body = match &self {
            InternalError::Validation(errors) => {
                let mut fields: Vec<String> =
                    errors.errors().keys().map(|field| field.to_string()).collect();
                fields.sort();

                json!({ "error": self.to_string(), "fields": fields })
            }
            _ => json!({ "error": self.to_string() }),
        };

        Custom(status, Json(body)).respond_to(request)
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
