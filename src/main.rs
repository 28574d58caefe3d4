pub mod auth;
pub mod blogs;
pub mod db;
pub mod error;
pub mod users;

use axum::{
    extract::FromRef,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthConfig, AuthService, TokenService};
use blogs::repository::BlogRepository;
use users::repository::UserRepository;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::login_handler,
        users::handlers::create_user_handler,
        users::handlers::get_user_handler,
        users::handlers::update_user_handler,
        users::handlers::delete_user_handler,
        blogs::handlers::all_blogs_handler,
        blogs::handlers::create_blog_handler,
        blogs::handlers::get_blog_handler,
        blogs::handlers::update_blog_handler,
        blogs::handlers::delete_blog_handler,
    ),
    components(
        schemas(
            auth::models::LoginRequest,
            auth::models::TokenResponse,
            users::models::CreateUser,
            users::models::UpdateUser,
            users::models::ShowUser,
            users::models::UserPublic,
            blogs::models::CreateBlog,
            blogs::models::UpdateBlog,
            blogs::models::ShowBlog,
            blogs::models::BlogSummary,
        )
    ),
    tags(
        (name = "authentication", description = "Login and token issuance"),
        (name = "users", description = "User registration and management"),
        (name = "blogs", description = "Blog CRUD endpoints")
    ),
    info(
        title = "Blog API",
        version = "1.0.0",
        description = "Blogging backend with bearer-token authentication"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenService,
    pub auth: AuthService,
    pub users: UserRepository,
    pub blogs: BlogRepository,
}

impl AppState {
    pub fn new(db: PgPool, config: AuthConfig) -> Self {
        let tokens = TokenService::new(config);
        let users = UserRepository::new(db.clone());
        let blogs = BlogRepository::new(db.clone());
        let auth = AuthService::new(users.clone(), tokens.clone());
        Self {
            db,
            tokens,
            auth,
            users,
            blogs,
        }
    }
}

// Lets the AuthenticatedUser extractor pull the token service out of any
// router built on AppState
impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

/// Creates and configures the application router
pub fn create_router(db: PgPool, config: AuthConfig) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState::new(db, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Authentication
        .route("/login", post(auth::handlers::login_handler))
        // Users
        .route("/user", post(users::handlers::create_user_handler))
        .route("/user/:id", get(users::handlers::get_user_handler))
        .route("/user/:id", put(users::handlers::update_user_handler))
        .route("/user/:id", delete(users::handlers::delete_user_handler))
        // Blogs
        .route("/blog", get(blogs::handlers::all_blogs_handler))
        .route("/blog", post(blogs::handlers::create_blog_handler))
        .route("/blog/:id", get(blogs::handlers::get_blog_handler))
        .route("/blog/:id", put(blogs::handlers::update_blog_handler))
        .route("/blog/:id", delete(blogs::handlers::delete_blog_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Blog API - Starting...");

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Secret sourcing is explicit: JWT_SECRET for stable restarts,
    // ephemeral otherwise (see AuthConfig::from_env)
    let auth_config = AuthConfig::from_env();

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let app = create_router(db_pool, auth_config);

    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Blog API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
