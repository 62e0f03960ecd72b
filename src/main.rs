use actix_web::{App, HttpServer, middleware, web};

use grantdesk::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        log::info!("No DATABASE_URL set — using data/grantdesk.db");
        "data/grantdesk.db".to_string()
    });
    if let Some(parent) = std::path::Path::new(&database_url).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("Failed to create data directory");
        }
    }

    let pool = db::init_pool(&database_url);
    db::run_migrations(&pool);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .service(web::scope("/api/v1").configure(handlers::api_v1::configure))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
