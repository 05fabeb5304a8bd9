//! Application factory
//!
//! Builds the actix-web application over any set of repository/hasher
//! implementations, so production wiring and tests share one route table.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::cors::create_cors;
use crate::routes::auth::{register::register, send_otp::send_otp, verify_otp::verify_otp, AppState};

use nh_core::repositories::{UserRepository, VerificationRepository};
use nh_core::services::verification::CodeHasher;

/// Create and configure the application with all dependencies
pub fn create_app<V, U, H>(
    app_state: web::Data<AppState<V, U, H>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    V: VerificationRepository + 'static,
    U: UserRepository + 'static,
    H: CodeHasher + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // Auth routes
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(register::<V, U, H>))
                .route("/send-otp", web::post().to(send_otp::<V, U, H>))
                .route("/verify-otp", web::post().to(verify_otp::<V, U, H>)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "nesthaven-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
