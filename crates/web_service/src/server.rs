use std::sync::Arc;

use actix_web::{web, App, HttpServer, ResponseError};
use anyhow::Context;
use log::{error, info};

use crate::config::ServerConfig;
use crate::controllers::{list_controller, todo_controller};
use crate::error::AppError;
use crate::middleware::{SessionMiddleware, TracingMiddleware};
use crate::services::session_store::SessionStore;

pub struct AppState {
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(
                config.session_idle_timeout,
                config.max_sessions,
            )),
        }
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    // Malformed form bodies get the same JSON error shape as everything else
    let form_config = web::FormConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest {
            status: err.status_code(),
            message: err.to_string(),
        }
        .into()
    });

    cfg.app_data(form_config)
        .configure(list_controller::config)
        .configure(todo_controller::config);
}

fn build_server(
    config: &ServerConfig,
    app_state: web::Data<AppState>,
) -> anyhow::Result<actix_web::dev::Server> {
    let cookie_name = config.cookie_name.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(SessionMiddleware::new(
                Arc::clone(&app_state.sessions),
                &cookie_name,
            ))
            .wrap(TracingMiddleware)
            .configure(app_config)
    })
    .workers(config.workers)
    .bind(config.bind_address())
    .with_context(|| format!("Failed to bind server to {}", config.bind_address()))?
    .run();

    Ok(server)
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    info!("Starting web service...");

    let app_state = web::Data::new(AppState::new(&config));
    let server = build_server(&config, app_state)?;

    info!("Starting web service on http://{}", config.bind_address());

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(e).context("Web server error");
    }

    Ok(())
}
