use super::state::{Notice, PageState};
use crate::infra::Recipe;
use std::fmt::Write;

const STYLE: &str = "
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
.recipe-card { border: 1px solid #ccc; border-radius: 6px; padding: 1rem; margin: 1rem 0; }
.recipe-card:hover { box-shadow: 0 0 8px #0ff; }
.card-controls { display: flex; gap: 1rem; align-items: center; }
.notice-success { color: #176117; }
.notice-error, .error-msg { color: #a11; }
.confirm { border: 2px solid #a11; padding: 1rem; }
textarea { width: 100%; min-height: 6rem; }
";

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn multiline(text: &str) -> String {
    text.lines().map(escape).collect::<Vec<_>>().join("<br>")
}

pub fn render_page(state: &PageState) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Recipe Box</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Recipe Box</h1>\n");

    if let Some(notice) = &state.notice {
        html.push_str(&render_notice(notice));
    }
    if let Some(recipe) = state.confirming_delete.and_then(|id| state.recipe(id)) {
        html.push_str(&render_confirm_delete(recipe));
    }

    let editing = state.editing.and_then(|id| state.recipe(id));
    html.push_str(&render_form(editing));
    html.push_str(&render_recipe_list(state));
    if let Some(items) = &state.shopping_list {
        html.push_str(&render_shopping_list(items));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_notice(notice: &Notice) -> String {
    let (class, text) = match notice {
        Notice::Success(text) => ("notice-success", text),
        Notice::Error(text) => ("notice-error", text),
    };
    format!("<p class=\"{}\" role=\"status\">{}</p>\n", class, escape(text))
}

fn render_confirm_delete(recipe: &Recipe) -> String {
    format!(
        "<section class=\"confirm\">\n\
         <p>Delete \"{name}\" permanently?</p>\n\
         <form method=\"post\" action=\"/ui/recipes/{id}/delete\">\n\
         <button type=\"submit\">Delete</button>\n\
         <a href=\"/\">Cancel</a>\n\
         </form>\n\
         </section>\n",
        name = escape(&recipe.name),
        id = recipe.id,
    )
}

/// Create form, or the edit form when a recipe is being edited.
fn render_form(editing: Option<&Recipe>) -> String {
    let (title, action, name, ingredients, instructions, button) = match editing {
        Some(r) => (
            "Edit recipe",
            format!("/ui/recipes/{}", r.id),
            r.name.as_str(),
            r.ingredients.as_str(),
            r.instructions.as_str(),
            "Save changes",
        ),
        None => ("New recipe", "/ui/recipes".to_string(), "", "", "", "Add recipe"),
    };

    let mut html = String::new();
    let _ = write!(
        html,
        "<section id=\"recipe-form\">\n<h2>{title}</h2>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <label>Name <input name=\"name\" value=\"{name}\" required></label>\n\
         <label>Ingredients (one per line)<textarea name=\"ingredients\">{ingredients}</textarea></label>\n\
         <label>Instructions<textarea name=\"instructions\">{instructions}</textarea></label>\n\
         <button type=\"submit\">{button}</button>\n",
        title = title,
        action = action,
        name = escape(name),
        ingredients = escape(ingredients),
        instructions = escape(instructions),
        button = button,
    );
    if editing.is_some() {
        html.push_str("<a href=\"/\">Cancel</a>\n");
    }
    html.push_str("</form>\n</section>\n");
    html
}

fn render_recipe_list(state: &PageState) -> String {
    let mut html = String::from("<section id=\"recipe-list\">\n<h2>Your recipes</h2>\n");

    if state.load_failed {
        html.push_str("<p class=\"error-msg\">Could not load recipes. Check that the store is reachable.</p>\n");
    } else if state.recipes.is_empty() {
        html.push_str("<p>No recipes yet. Add one!</p>\n");
    } else {
        html.push_str("<form method=\"post\" action=\"/ui/shoppinglist\">\n");
        for recipe in &state.recipes {
            html.push_str(&render_card(recipe, state.selected.contains(&recipe.id)));
        }
        html.push_str("<button type=\"submit\" id=\"generate-list-btn\">Make shopping list</button>\n</form>\n");
    }

    html.push_str("</section>\n");
    html
}

pub fn render_card(recipe: &Recipe, selected: bool) -> String {
    format!(
        "<article class=\"recipe-card\">\n\
         <div class=\"card-controls\">\n\
         <label><input type=\"checkbox\" name=\"recipe_ids\" value=\"{id}\"{checked}> Add to shopping list</label>\n\
         <a href=\"/?edit={id}\">Edit</a>\n\
         <a href=\"/?delete={id}\">Delete</a>\n\
         </div>\n\
         <h3>{name}</h3>\n\
         <p><strong>Ingredients:</strong></p>\n<p>{ingredients}</p>\n\
         <p><strong>Instructions:</strong></p>\n<p>{instructions}</p>\n\
         </article>\n",
        id = recipe.id,
        checked = if selected { " checked" } else { "" },
        name = escape(&recipe.name),
        ingredients = multiline(&recipe.ingredients),
        instructions = multiline(&recipe.instructions),
    )
}

fn render_shopping_list(items: &[String]) -> String {
    let mut html = String::from("<section id=\"shopping-list\">\n<h2>Shopping list</h2>\n");
    if items.is_empty() {
        html.push_str("<p>The selected recipes have no ingredients.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for item in items {
            let _ = writeln!(html, "<li>{}</li>", escape(item));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
    html
}
