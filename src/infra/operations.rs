//! The recipe operations behind both the JSON API and the HTML page.
//!
//! Each call maps one store result onto the shared [`ApiError`] taxonomy, so
//! the two front ends cannot disagree about not-found or failure handling.
use super::{ApiError, Recipe, RecipeDraft, RecipeId, RecipeStore};
use crate::shopping;

pub async fn list(store: &dyn RecipeStore, operation: &str) -> Result<Vec<Recipe>, ApiError> {
    store
        .list()
        .await
        .map_err(|e| ApiError::internal(operation, e))
}

pub async fn create(
    store: &dyn RecipeStore,
    operation: &str,
    draft: RecipeDraft,
) -> Result<Recipe, ApiError> {
    store
        .create(draft)
        .await
        .map_err(|e| ApiError::on_create(operation, e))
}

pub async fn update(
    store: &dyn RecipeStore,
    operation: &str,
    id: RecipeId,
    draft: RecipeDraft,
) -> Result<Recipe, ApiError> {
    match store.update(id, draft).await {
        Ok(Some(recipe)) => Ok(recipe),
        Ok(None) => Err(ApiError::not_found(operation, id)),
        Err(e) => Err(ApiError::internal(operation, e)),
    }
}

pub async fn delete(store: &dyn RecipeStore, operation: &str, id: RecipeId) -> Result<(), ApiError> {
    match store.delete(id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ApiError::not_found(operation, id)),
        Err(e) => Err(ApiError::internal(operation, e)),
    }
}

pub async fn shopping_list(
    store: &dyn RecipeStore,
    operation: &str,
    ids: &[RecipeId],
) -> Result<Vec<String>, ApiError> {
    shopping::shopping_list(store, ids)
        .await
        .map_err(|e| ApiError::shopping(operation, e))
}
