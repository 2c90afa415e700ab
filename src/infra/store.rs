use super::types::{Recipe, RecipeDraft, RecipeId, RecipeIngredients};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The statement reached the store and was rejected on data grounds.
    #[error("store rejected the data: {0}")]
    Data(String),
    /// The statement could not be attempted at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) => StoreError::Data(e.to_string()),
            e @ (sqlx::Error::RowNotFound
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)) => StoreError::Data(e.to_string()),
            e => StoreError::Unavailable(e.to_string()),
        }
    }
}

/// Persistence for recipe records. Every method maps onto one atomic statement.
#[rocket::async_trait]
pub trait RecipeStore: Send + Sync {
    /// Human readable name of the backend, for startup logs.
    fn kind(&self) -> &'static str;

    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// All recipes, newest (highest id) first.
    async fn list(&self) -> Result<Vec<Recipe>, StoreError>;

    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, StoreError>;

    /// Replaces all fields of `id`. `None` when no such recipe exists.
    async fn update(&self, id: RecipeId, draft: RecipeDraft) -> Result<Option<Recipe>, StoreError>;

    /// `false` when no such recipe exists.
    async fn delete(&self, id: RecipeId) -> Result<bool, StoreError>;

    /// Ingredient texts of the given recipes, in no particular order.
    /// Unknown ids are absent from the result.
    async fn ingredients_for(&self, ids: &[RecipeId]) -> Result<Vec<RecipeIngredients>, StoreError>;
}

pub type DynStore = Box<dyn RecipeStore>;
