mod config;
mod db;
mod services;

use crate::config::Config;
use crate::db::Database;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use clap::Parser;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded dashboard bundle, falling back to `index.html` so
/// client-side routes such as `/dashboard/mechanics` resolve.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::parse();

    let database = Database::new(&config.db);
    database.init().map_err(|e| {
        error!("Cannot initialise {}: {}", database.path().display(), e);
        std::io::Error::other(e)
    })?;
    if config.seed_demo {
        database.seed_demo().map_err(std::io::Error::other)?;
    }

    let url = config.url();
    if config.open_browser {
        let dashboard_url = format!("{}/dashboard/mechanics", url);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&dashboard_url);
        });
    }

    info!("Server running at {} (database {})", url, database.path().display());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(database.clone()))
            .service(services::mechanic::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
