use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type RecipeId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, FromRow)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
}

/// Body of create and update requests. All three fields are always replaced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, FromForm)]
pub struct RecipeDraft {
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
}

impl RecipeDraft {
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            name: self.name,
            ingredients: self.ingredients,
            instructions: self.instructions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RecipeIngredients {
    pub id: RecipeId,
    pub ingredients: String,
}
