#[macro_use]
extern crate rocket;

mod config;
mod infra;
mod shopping;
mod ui;

use config::{Config, ConfigError, StoreKind};
use infra::*;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Build, Request, Response, Rocket};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Attaching CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[derive(Error, Debug)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not open the recipe store: {0}")]
    Store(#[from] StoreError),
    #[error("server error: {0}")]
    Rocket(#[from] rocket::Error),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Rocket installs its own logger when none is set yet; ours wins.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn open_store(config: &Config) -> Result<DynStore, StoreError> {
    let store: DynStore = match config.store {
        StoreKind::Postgres => Box::new(PgRep::init(&config.database).await?),
        StoreKind::Memory => Box::new(MemoryRep::default()),
    };
    store.ensure_schema().await?;
    Ok(store)
}

/// Assembles the application around `store`. Listening settings are applied by the caller.
pub fn build(store: DynStore) -> Rocket<Build> {
    rocket::build()
        .manage(store)
        .mount(
            "/api",
            routes![
                list_recipes,
                create_recipe,
                update_recipe,
                delete_recipe,
                shopping_list
            ],
        )
        .mount(
            "/",
            routes![
                preflight,
                ui::routes::index,
                ui::routes::create,
                ui::routes::update,
                ui::routes::delete,
                ui::routes::shopping_list
            ],
        )
        .register("/api", catchers![api_error])
        .attach(CORS)
}

#[rocket::main]
async fn main() -> Result<(), StartupError> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let store = open_store(&config).await?;
    tracing::info!(
        store = store.kind(),
        address = %config.address,
        port = config.port,
        "starting recipe box"
    );

    let figment = rocket::Config::figment()
        .merge(("address", config.address))
        .merge(("port", config.port));
    build(store).configure(figment).launch().await?;
    Ok(())
}
