use super::{operations, ApiError, DynStore, ErrorBody, Recipe, RecipeDraft, RecipeId};
use rocket::response::status::Created;
use rocket::serde::json::{self, Json};
use rocket::{http::Status, Request, State};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ShoppingListRequest {
    #[serde(rename = "recipeIds")]
    pub recipe_ids: Vec<RecipeId>,
}

#[get("/recipes")]
pub async fn list_recipes(db: &State<DynStore>) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = operations::list(db.inner().as_ref(), "list_recipes").await?;
    Ok(Json(recipes))
}

#[post("/recipes", data = "<body>")]
pub async fn create_recipe(
    db: &State<DynStore>,
    body: Result<Json<RecipeDraft>, json::Error<'_>>,
) -> Result<Created<Json<Recipe>>, ApiError> {
    let draft = body.map_err(|e| ApiError::bad_input("create_recipe", e))?;
    let recipe = operations::create(db.inner().as_ref(), "create_recipe", draft.into_inner()).await?;
    let location = format!("/api/recipes/{}", recipe.id);
    Ok(Created::new(location).body(Json(recipe)))
}

#[put("/recipes/<id>", data = "<body>")]
pub async fn update_recipe(
    db: &State<DynStore>,
    id: RecipeId,
    body: Result<Json<RecipeDraft>, json::Error<'_>>,
) -> Result<Json<Recipe>, ApiError> {
    let draft = body.map_err(|e| ApiError::bad_input("update_recipe", e))?;
    let recipe = operations::update(db.inner().as_ref(), "update_recipe", id, draft.into_inner()).await?;
    Ok(Json(recipe))
}

#[delete("/recipes/<id>")]
pub async fn delete_recipe(db: &State<DynStore>, id: RecipeId) -> Result<Status, ApiError> {
    operations::delete(db.inner().as_ref(), "delete_recipe", id).await?;
    Ok(Status::NoContent)
}

#[post("/shoppinglist", data = "<body>")]
pub async fn shopping_list(
    db: &State<DynStore>,
    body: Result<Json<ShoppingListRequest>, json::Error<'_>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let request = body.map_err(|e| ApiError::bad_input("shopping_list", e))?;
    let list = operations::shopping_list(db.inner().as_ref(), "shopping_list", &request.recipe_ids).await?;
    Ok(Json(list))
}

/// Answers CORS preflight requests for every path.
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::NoContent
}

#[catch(default)]
pub fn api_error(status: Status, _req: &Request) -> (Status, Json<ErrorBody>) {
    let error = status.reason().unwrap_or("unknown error").to_lowercase();
    (status, Json(ErrorBody { error }))
}
