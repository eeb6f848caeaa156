use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use vibeseat_backend::{
    config::Config,
    db::connection::create_pool,
    docs::ApiDoc,
    handlers,
    middleware as auth_middleware,
    models::user::{User, UserRole},
    repositories::user::UserRepository,
    utils::password,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

/// Seeds an `admin` account on an empty database when
/// `BOOTSTRAP_ADMIN_PASSWORD` is configured.
async fn bootstrap_admin(pool: &PgPool, config: &Config) -> anyhow::Result<()> {
    let Some(admin_password) = config.bootstrap_admin_password.as_deref() else {
        return Ok(());
    };

    let repo = UserRepository::new();
    let user_count = repo
        .count(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {:?}", e))?;
    if user_count > 0 {
        return Ok(());
    }

    let password_hash = password::hash_password(admin_password)?;
    let admin = User::new(
        "admin".to_string(),
        password_hash,
        "Administrator".to_string(),
        UserRole::Admin,
    );
    repo.create(pool, &admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed admin user: {:?}", e))?;
    tracing::info!(user_id = %admin.id, "Seeded bootstrap admin account");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibeseat_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        jwt_secret = %mask_secret(&config.jwt_secret),
        jwt_expiration_hours = config.jwt_expiration_hours,
        refresh_token_expiration_days = config.refresh_token_expiration_days,
        time_zone = %config.time_zone,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    bootstrap_admin(&pool, &config).await?;

    // Build public routes (no auth)
    let public_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh));

    // Build user-protected routes (auth required)
    let user_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/availability",
            get(handlers::availability::list_availability),
        )
        .route("/api/chairs", get(handlers::chairs::list_chairs))
        .route(
            "/api/appointments",
            get(handlers::appointments::list_appointments)
                .post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/me",
            get(handlers::appointments::my_appointments),
        )
        .route(
            "/api/appointments/{id}",
            axum::routing::delete(handlers::appointments::cancel_appointment),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            (pool.clone(), config.clone()),
            auth_middleware::auth,
        ));

    // Build attendant-protected routes (auth + attendant or admin role)
    let attendant_routes = Router::new()
        .route(
            "/api/appointments/{id}/confirm",
            put(handlers::appointments::confirm_appointment),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            (pool.clone(), config.clone()),
            auth_middleware::auth_attendant,
        ));

    // Build admin-protected routes (auth + admin role)
    let admin_routes = Router::new()
        .route(
            "/api/admin/chairs",
            get(handlers::chairs::admin_list_chairs).post(handlers::chairs::create_chair),
        )
        .route(
            "/api/admin/chairs/{id}",
            put(handlers::chairs::update_chair).delete(handlers::chairs::delete_chair),
        )
        .route(
            "/api/admin/schedule",
            get(handlers::schedules::get_schedule).post(handlers::schedules::create_schedule),
        )
        .route(
            "/api/admin/schedule/{id}",
            put(handlers::schedules::update_schedule)
                .delete(handlers::schedules::delete_schedule),
        )
        .route(
            "/api/admin/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            (pool.clone(), config.clone()),
            auth_middleware::auth_admin,
        ));

    // Compose app with shared layers (CORS/Trace) and shared state
    let app = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(attendant_routes)
        .merge(admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state((pool, config));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
