use super::store::StoreError;
use crate::shopping::ShoppingListError;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("recipe not found")]
    NotFound,
    #[error("invalid request: {0}")]
    BadInput(String),
    #[error("invalid recipe data or store error")]
    Data,
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::NotFound => Status::NotFound,
            ApiError::BadInput(_) | ApiError::Data => Status::BadRequest,
            ApiError::Internal => Status::InternalServerError,
        }
    }

    /// Any store failure on create is reported as a client-data error. The
    /// two kinds are still logged apart.
    pub fn on_create(operation: &str, err: StoreError) -> Self {
        match &err {
            StoreError::Data(_) => {
                tracing::warn!(operation, error = %err, "store rejected recipe data")
            }
            StoreError::Unavailable(_) => {
                tracing::error!(operation, error = %err, "store unavailable")
            }
        }
        ApiError::Data
    }

    pub fn internal(operation: &str, err: StoreError) -> Self {
        tracing::error!(operation, error = %err, "store operation failed");
        ApiError::Internal
    }

    pub fn not_found(operation: &str, id: i32) -> Self {
        tracing::warn!(operation, id, "recipe not found");
        ApiError::NotFound
    }

    pub fn bad_input(operation: &str, reason: impl ToString) -> Self {
        let reason = reason.to_string();
        tracing::warn!(operation, reason = %reason, "rejected request");
        ApiError::BadInput(reason)
    }

    pub fn shopping(operation: &str, err: ShoppingListError) -> Self {
        match err {
            ShoppingListError::NoRecipes => Self::bad_input(operation, err),
            ShoppingListError::Store(e) => Self::internal(operation, e),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).respond_to(req)
    }
}
