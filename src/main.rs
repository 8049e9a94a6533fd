use std::io;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tera::Tera;

use peakkart::db::{DbPool, establish_connection_pool};
use peakkart::events::{CategoryCache, CategoryFeed};
use peakkart::models::config::ServerConfig;
use peakkart::repository::DieselRepository;
use peakkart::routes::admin::{add_product, analytics, dashboard, login, logout, show_login};
use peakkart::routes::api::{api_v1_create_product, api_v1_products, api_v1_suggestions};
use peakkart::routes::compare::{add_compared, clear_comparison, remove_compared, show_comparison};
use peakkart::routes::main::{index, not_found, show_category, toggle_theme};
use peakkart::routes::products::{buy_product, show_product};
use peakkart::services::auth::AdminAuthenticator;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn run_migrations(pool: &DbPool) -> Result<(), String> {
    let mut conn = pool.get().map_err(|e| e.to_string())?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| e.to_string())?;
    for version in applied {
        log::info!("Applied migration {version}");
    }
    Ok(())
}

fn startup_error(message: String) -> io::Error {
    log::error!("{message}");
    io::Error::other(message)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = ServerConfig::load("config/default")
        .map_err(|e| startup_error(format!("Failed to load configuration: {e}")))?;

    let pool = establish_connection_pool(&server_config.database_url)
        .map_err(|e| startup_error(format!("Failed to establish database connection: {e}")))?;
    run_migrations(&pool)
        .map_err(|e| startup_error(format!("Failed to run database migrations: {e}")))?;

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| startup_error(format!("Template parsing error(s): {e}")))?;

    let secret_key = Key::try_from(server_config.secret_key.as_bytes())
        .map_err(|e| startup_error(format!("Secret key must be at least 64 bytes: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let feed = web::Data::new(CategoryFeed::new());
    let cache = web::Data::new(CategoryCache::new(&feed));
    let repo = web::Data::new(DieselRepository::new(pool));
    let authenticator = web::Data::new(AdminAuthenticator::from_config(&server_config.admin));
    let tera = web::Data::new(tera);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting storefront on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .service(Files::new("/assets", server_config.assets_dir.clone()))
            .service(
                web::scope("/api")
                    .service(api_v1_products)
                    .service(api_v1_create_product)
                    .service(api_v1_suggestions),
            )
            .service(index)
            .service(show_category)
            .service(toggle_theme)
            .service(show_product)
            .service(buy_product)
            .service(show_comparison)
            // `clear` must be registered before the `{product_id}` routes.
            .service(clear_comparison)
            .service(remove_compared)
            .service(add_compared)
            .service(show_login)
            .service(login)
            .service(logout)
            .service(dashboard)
            .service(add_product)
            .service(analytics)
            .default_service(web::to(not_found))
            .app_data(repo.clone())
            .app_data(feed.clone())
            .app_data(cache.clone())
            .app_data(authenticator.clone())
            .app_data(tera.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
