use crate::infra::{Recipe, RecipeId};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Everything the recipe page shows. Rendering reads nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub recipes: Vec<Recipe>,
    pub load_failed: bool,
    pub selected: BTreeSet<RecipeId>,
    pub editing: Option<RecipeId>,
    pub confirming_delete: Option<RecipeId>,
    pub shopping_list: Option<Vec<String>>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    RecipesLoaded(Vec<Recipe>),
    LoadFailed,
    EditRequested(RecipeId),
    DeleteRequested(RecipeId),
    SelectionChanged(Vec<RecipeId>),
    ShoppingListReady(Vec<String>),
    Notify(Notice),
}

impl PageState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::RecipesLoaded(recipes) => {
                self.selected.retain(|id| recipes.iter().any(|r| r.id == *id));
                self.recipes = recipes;
                self.load_failed = false;
            }
            UiEvent::LoadFailed => {
                self.recipes.clear();
                self.load_failed = true;
            }
            UiEvent::EditRequested(id) => {
                if self.recipe(id).is_some() {
                    self.editing = Some(id);
                    self.confirming_delete = None;
                }
            }
            UiEvent::DeleteRequested(id) => {
                if self.recipe(id).is_some() {
                    self.confirming_delete = Some(id);
                    self.editing = None;
                }
            }
            UiEvent::SelectionChanged(ids) => {
                self.selected = ids.into_iter().collect();
                self.shopping_list = None;
            }
            UiEvent::ShoppingListReady(items) => self.shopping_list = Some(items),
            UiEvent::Notify(notice) => self.notice = Some(notice),
        }
    }

    pub fn with(mut self, event: UiEvent) -> Self {
        self.apply(event);
        self
    }

    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: RecipeId) -> Recipe {
        Recipe {
            id,
            name: format!("recipe {}", id),
            ingredients: String::new(),
            instructions: String::new(),
        }
    }

    #[test]
    fn test_edit_and_delete_need_a_loaded_recipe() {
        let state = PageState::default()
            .with(UiEvent::RecipesLoaded(vec![recipe(2), recipe(1)]))
            .with(UiEvent::EditRequested(9))
            .with(UiEvent::DeleteRequested(9));
        assert_eq!(state.editing, None);
        assert_eq!(state.confirming_delete, None);

        let state = state
            .with(UiEvent::EditRequested(1))
            .with(UiEvent::DeleteRequested(2));
        assert_eq!(state.editing, None);
        assert_eq!(state.confirming_delete, Some(2));
    }

    #[test]
    fn test_reload_drops_selection_of_deleted_recipes() {
        let state = PageState::default()
            .with(UiEvent::RecipesLoaded(vec![recipe(2), recipe(1)]))
            .with(UiEvent::SelectionChanged(vec![1, 2]))
            .with(UiEvent::RecipesLoaded(vec![recipe(2)]));
        assert_eq!(state.selected.into_iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_load_failure_keeps_notice() {
        let state = PageState::default()
            .with(UiEvent::Notify(Notice::Error("boom".into())))
            .with(UiEvent::LoadFailed);
        assert!(state.load_failed);
        assert!(state.recipes.is_empty());
        assert_eq!(state.notice, Some(Notice::Error("boom".into())));
    }
}
