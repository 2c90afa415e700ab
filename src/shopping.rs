use crate::infra::{RecipeId, RecipeStore, StoreError};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShoppingListError {
    #[error("select at least one recipe for the shopping list")]
    NoRecipes,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Unicode whitespace plus the byte order mark, which editors and browsers
/// leave at the start of pasted text.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Collapses the ingredient lines of several recipes into distinct entries.
///
/// Lines are trimmed and blank ones dropped. Two lines are the same ingredient
/// only when they are equal after trimming: no case folding, no quantity or
/// unit merging ("500g flour" and "200g flour" stay separate). Entries keep the
/// order in which they were first seen.
pub fn consolidate<I, S>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for text in texts {
        for line in text.as_ref().lines().map(|l| l.trim_matches(is_blank)).filter(|l| !l.is_empty()) {
            let count = counts.entry(line.to_string()).or_insert(0);
            if *count == 0 {
                order.push(line.to_string());
            }
            *count += 1;
        }
    }

    order
}

/// Builds the shopping list for `ids`, reading recipes in the order the ids
/// were given. Unknown ids contribute nothing.
pub async fn shopping_list(
    store: &dyn RecipeStore,
    ids: &[RecipeId],
) -> Result<Vec<String>, ShoppingListError> {
    if ids.is_empty() {
        return Err(ShoppingListError::NoRecipes);
    }

    let mut rows = store.ingredients_for(ids).await?;
    rows.sort_by_key(|row| ids.iter().position(|id| *id == row.id));

    Ok(consolidate(rows.iter().map(|row| row.ingredients.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MemoryRep, RecipeDraft};

    #[test]
    fn test_consolidate_collapses_duplicates_in_first_seen_order() {
        assert_eq!(
            consolidate(["2 eggs\nflour\n", "flour\nmilk"]),
            vec!["2 eggs", "flour", "milk"]
        );
    }

    #[test]
    fn test_consolidate_blank_lines_only() {
        assert!(consolidate(["\n  \n"]).is_empty());
        assert!(consolidate(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_consolidate_trims_but_keeps_case() {
        assert_eq!(
            consolidate(["flour\n  flour  ", "Flour"]),
            vec!["flour", "Flour"]
        );
    }

    #[test]
    fn test_consolidate_does_not_merge_quantities() {
        assert_eq!(
            consolidate(["500g flour", "200g flour"]),
            vec!["500g flour", "200g flour"]
        );
    }

    #[test]
    fn test_consolidate_strips_byte_order_mark_and_nbsp() {
        assert_eq!(
            consolidate(["\u{feff}flour\n\u{a0}milk\u{a0}", "flour\nmilk\n\u{feff}"]),
            vec!["flour", "milk"]
        );
    }

    #[test]
    fn test_consolidate_handles_crlf() {
        assert_eq!(consolidate(["salt\r\npepper\r\n"]), vec!["salt", "pepper"]);
    }

    async fn seeded() -> (MemoryRep, Vec<RecipeId>) {
        let rep = MemoryRep::default();
        let mut ids = Vec::new();
        for ingredients in ["butter\nsugar", "sugar\neggs"] {
            let recipe = rep
                .create(RecipeDraft {
                    name: "cake".to_string(),
                    ingredients: ingredients.to_string(),
                    instructions: String::new(),
                })
                .await
                .unwrap();
            ids.push(recipe.id);
        }
        (rep, ids)
    }

    #[rocket::async_test]
    async fn test_shopping_list_follows_request_order() {
        let (rep, ids) = seeded().await;
        let list = shopping_list(&rep, &[ids[1], ids[0]]).await.unwrap();
        assert_eq!(list, vec!["sugar", "eggs", "butter"]);
    }

    #[rocket::async_test]
    async fn test_shopping_list_repeated_ids_contribute_once() {
        let (rep, ids) = seeded().await;
        let list = shopping_list(&rep, &[ids[1], ids[0], ids[1]]).await.unwrap();
        assert_eq!(list, vec!["sugar", "eggs", "butter"]);
    }

    #[rocket::async_test]
    async fn test_shopping_list_skips_unknown_ids() {
        let (rep, ids) = seeded().await;
        let list = shopping_list(&rep, &[404, ids[0]]).await.unwrap();
        assert_eq!(list, vec!["butter", "sugar"]);

        assert!(shopping_list(&rep, &[404]).await.unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn test_shopping_list_rejects_empty_selection() {
        let (rep, _) = seeded().await;
        assert_eq!(
            shopping_list(&rep, &[]).await,
            Err(ShoppingListError::NoRecipes)
        );
    }
}
