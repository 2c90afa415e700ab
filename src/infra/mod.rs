pub mod errors;
pub mod memory;
pub mod operations;
pub mod postgres;
pub mod routes;
pub mod store;
pub mod types;

pub use errors::{ApiError, ErrorBody};
pub use memory::MemoryRep;
pub use postgres::PgRep;
pub use routes::*;
pub use store::{DynStore, RecipeStore, StoreError};
pub use types::{Recipe, RecipeDraft, RecipeId, RecipeIngredients};
