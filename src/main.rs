use library_loan_api::{
    adapters::memory::InMemoryLoanStore,
    adapters::mock::MockMemberDirectory,
    adapters::postgres::PostgresLoanStore,
    api::{handlers::AppState, router::create_router},
    application::loan::ServiceDependencies,
    ports::{LoanStore, Member},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_loan_api=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Loan storage: PostgreSQL when DATABASE_URL is set, in-memory otherwise
    let loan_store: Arc<dyn LoanStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            tracing::info!("Database URL: {}", database_url);

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await
                .expect("Failed to connect to database");

            Arc::new(PostgresLoanStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, falling back to the in-memory loan store");
            Arc::new(InMemoryLoanStore::new())
        }
    };

    // TODO: replace with an HTTP client adapter once the member service
    // exposes its lookup endpoint; until then members are seeded locally.
    let member_directory = Arc::new(MockMemberDirectory::new());
    for (id, name, email) in [
        (1, "Alice Tan", "alice@example.org"),
        (2, "Budi Santoso", "budi@example.org"),
        (3, "Citra Dewi", "citra@example.org"),
    ] {
        member_directory.add_member(Member {
            id,
            name: name.to_string(),
            email: email.to_string(),
        });
    }

    // Create service dependencies
    let service_deps = ServiceDependencies {
        loan_store,
        member_directory,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
