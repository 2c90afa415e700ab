use super::render::render_page;
use super::state::{Notice, PageState, UiEvent};
use crate::infra::{operations, ApiError, DynStore, RecipeDraft, RecipeId, RecipeStore};
use rocket::form::{Errors, Form};
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::State;

#[derive(Debug, FromForm)]
pub struct SelectionForm {
    #[field(default = Vec::new())]
    pub recipe_ids: Vec<RecipeId>,
}

async fn load(store: &dyn RecipeStore) -> PageState {
    match operations::list(store, "ui_list_recipes").await {
        Ok(recipes) => PageState::default().with(UiEvent::RecipesLoaded(recipes)),
        Err(_) => PageState::default().with(UiEvent::LoadFailed),
    }
}

fn notice(flash: Option<FlashMessage<'_>>) -> Option<Notice> {
    flash.map(|f| match f.kind() {
        "success" => Notice::Success(f.message().to_string()),
        _ => Notice::Error(f.message().to_string()),
    })
}

/// User-facing text for a failed operation.
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::NotFound => "That recipe was not found.".to_string(),
        ApiError::BadInput(reason) => format!("Invalid input: {}.", reason),
        ApiError::Data => "The recipe could not be saved.".to_string(),
        ApiError::Internal => "Something went wrong, please try again.".to_string(),
    }
}

fn home() -> Redirect {
    Redirect::to("/")
}

fn outcome<T>(result: Result<T, ApiError>, success: impl FnOnce(T) -> String) -> Flash<Redirect> {
    match result {
        Ok(value) => Flash::success(home(), success(value)),
        Err(e) => Flash::error(home(), failure_message(&e)),
    }
}

fn form_error(operation: &str, errors: Errors<'_>) -> ApiError {
    tracing::debug!(operation, errors = ?errors, "form rejected");
    ApiError::bad_input(operation, "some fields are missing or malformed")
}

#[get("/?<edit>&<delete>")]
pub async fn index(
    db: &State<DynStore>,
    edit: Option<RecipeId>,
    delete: Option<RecipeId>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let mut state = load(db.inner().as_ref()).await;
    if let Some(notice) = notice(flash) {
        state.apply(UiEvent::Notify(notice));
    }
    if let Some(id) = edit {
        state.apply(UiEvent::EditRequested(id));
    }
    if let Some(id) = delete {
        state.apply(UiEvent::DeleteRequested(id));
    }
    RawHtml(render_page(&state))
}

#[post("/ui/recipes", data = "<form>")]
pub async fn create(
    db: &State<DynStore>,
    form: Result<Form<RecipeDraft>, Errors<'_>>,
) -> Flash<Redirect> {
    let result = match form {
        Ok(form) => operations::create(db.inner().as_ref(), "ui_create_recipe", form.into_inner()).await,
        Err(errors) => Err(form_error("ui_create_recipe", errors)),
    };
    outcome(result, |recipe| format!("Saved recipe {}.", recipe.name))
}

#[post("/ui/recipes/<id>", data = "<form>")]
pub async fn update(
    db: &State<DynStore>,
    id: RecipeId,
    form: Result<Form<RecipeDraft>, Errors<'_>>,
) -> Flash<Redirect> {
    let result = match form {
        Ok(form) => operations::update(db.inner().as_ref(), "ui_update_recipe", id, form.into_inner()).await,
        Err(errors) => Err(form_error("ui_update_recipe", errors)),
    };
    outcome(result, |recipe| format!("Updated recipe {}.", recipe.name))
}

/// Only reachable from the confirmation panel rendered for `/?delete=<id>`.
#[post("/ui/recipes/<id>/delete")]
pub async fn delete(db: &State<DynStore>, id: RecipeId) -> Flash<Redirect> {
    let result = operations::delete(db.inner().as_ref(), "ui_delete_recipe", id).await;
    outcome(result, |()| "Recipe deleted.".to_string())
}

#[post("/ui/shoppinglist", data = "<form>")]
pub async fn shopping_list(
    db: &State<DynStore>,
    form: Result<Form<SelectionForm>, Errors<'_>>,
) -> RawHtml<String> {
    let store = db.inner().as_ref();
    let mut state = load(store).await;

    let result = match form {
        Ok(form) => {
            let ids = form.into_inner().recipe_ids;
            state.apply(UiEvent::SelectionChanged(ids.clone()));
            operations::shopping_list(store, "ui_shopping_list", &ids).await
        }
        Err(errors) => Err(form_error("ui_shopping_list", errors)),
    };

    match result {
        Ok(items) => state.apply(UiEvent::ShoppingListReady(items)),
        Err(e) => state.apply(UiEvent::Notify(Notice::Error(failure_message(&e)))),
    }

    RawHtml(render_page(&state))
}
