use actix_web::{web, HttpServer};
use log::info;
use std::sync::Arc;

use nh_api::routes::AppState;
use nh_api::{app, config};

use nh_core::services::auth::{AuthService, AuthServiceConfig};
use nh_core::services::verification::{
    BcryptCodeHasher, VerificationService, VerificationServiceConfig,
};
use nh_infra::mail::create_mailer;
use nh_infra::{DatabasePool, MySqlUserRepository, MySqlVerificationRepository};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting NestHaven API server");

    // Load configuration
    let app_config = config::load_config().expect("Failed to load configuration");
    info!("Environment: {}", app_config.environment);

    // Database pool and repositories
    let db_pool = DatabasePool::new(&app_config.database)
        .await
        .expect("Failed to create database pool");
    let user_repository = Arc::new(MySqlUserRepository::new(db_pool.get_pool().clone()));
    let verification_repository =
        Arc::new(MySqlVerificationRepository::new(db_pool.get_pool().clone()));

    // Mail delivery and code hashing
    let mailer = create_mailer(&app_config.mail).expect("Failed to create mailer");
    let hasher = Arc::new(BcryptCodeHasher::new(app_config.verification.bcrypt_cost));

    // Services
    let verification_service = Arc::new(VerificationService::new(
        verification_repository,
        user_repository.clone(),
        mailer,
        hasher,
        VerificationServiceConfig::from_settings(
            &app_config.verification,
            app_config.mail.expose_code_to_caller,
        ),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        verification_service,
        AuthServiceConfig {
            password_hash_cost: app_config.verification.bcrypt_cost,
            ..Default::default()
        },
    ));

    let app_state = web::Data::new(AppState { auth_service });

    let bind_address = app_config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let workers = app_config.server.workers;
    let mut server = HttpServer::new(move || app::create_app(app_state.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await
}
