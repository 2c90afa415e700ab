use super::store::{RecipeStore, StoreError};
use super::types::{Recipe, RecipeDraft, RecipeId, RecipeIngredients};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Table {
    rows: BTreeMap<RecipeId, Recipe>,
    last_id: RecipeId,
}

/// Recipe table held in process memory. Ids are never reused.
#[derive(Default)]
pub struct MemoryRep {
    table: Mutex<Table>,
}

impl MemoryRep {
    fn table(&self) -> Result<MutexGuard<'_, Table>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("recipe table lock poisoned".to_string()))
    }
}

#[rocket::async_trait]
impl RecipeStore for MemoryRep {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.table()?.rows.values().rev().cloned().collect())
    }

    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        let mut table = self.table()?;
        table.last_id += 1;
        let recipe = draft.into_recipe(table.last_id);
        table.rows.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, id: RecipeId, draft: RecipeDraft) -> Result<Option<Recipe>, StoreError> {
        let mut table = self.table()?;
        Ok(table.rows.get_mut(&id).map(|row| {
            *row = draft.into_recipe(id);
            row.clone()
        }))
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, StoreError> {
        Ok(self.table()?.rows.remove(&id).is_some())
    }

    async fn ingredients_for(&self, ids: &[RecipeId]) -> Result<Vec<RecipeIngredients>, StoreError> {
        let table = self.table()?;
        Ok(table
            .rows
            .values()
            .filter(|r| ids.contains(&r.id))
            .map(|r| RecipeIngredients {
                id: r.id,
                ingredients: r.ingredients.clone(),
            })
            .collect())
    }
}
