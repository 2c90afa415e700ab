//! Browser front end: the recipe page rendered on the server.
//!
//! Handlers never touch markup directly. They build a [`state::PageState`]
//! from [`state::UiEvent`]s and hand it to [`render::render_page`].
pub mod render;
pub mod routes;
pub mod state;
