pub mod config;
pub mod hub;
pub mod rooms;
pub mod users;

use std::path::Path;

use axum::{extract::FromRef, Router};
use tower_http::{cors::CorsLayer, services::ServeDir};

pub use config::Config;
pub use hub::Hub;
pub use rooms::Bot;
pub use users::{User, UserError, Users};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub users: Users,
    pub hub: Hub,
    pub bot: Bot,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            users: Users::new(),
            hub: Hub::new(),
            bot: Bot {
                name: config.bot_name.clone(),
                offset: config.utc_offset,
            },
        }
    }
}

/// `/ws` for the chat socket, everything else from `public_dir`.
pub fn app(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .merge(rooms::router())
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
