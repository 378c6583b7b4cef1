use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use school_announcements::{
    config::{Config, StoreKind},
    db::{
        self, AnnouncementStore, MemoryStore, PgAnnouncementStore, PgTeacherDirectory,
        TeacherDirectory,
    },
    middleware::cors::create_cors_layer,
    routes,
    services::metrics,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (announcements, teachers): (Arc<dyn AnnouncementStore>, Arc<dyn TeacherDirectory>) =
        match config.store {
            StoreKind::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for STORE=postgres"))?;
                let pool = db::create_pool(url, config.database_max_connections).await?;
                db::run_migrations(&pool).await?;
                info!("Database connected and migrations applied");
                let announcements: Arc<dyn AnnouncementStore> =
                    Arc::new(PgAnnouncementStore::new(pool.clone()));
                let teachers: Arc<dyn TeacherDirectory> = Arc::new(PgTeacherDirectory::new(pool));
                (announcements, teachers)
            }
            StoreKind::Memory => {
                let store = Arc::new(MemoryStore::with_teachers(config.seed_teachers.clone()));
                info!(
                    "In-memory store ready with {} teacher(s)",
                    config.seed_teachers.len()
                );
                let announcements: Arc<dyn AnnouncementStore> = store.clone();
                let teachers: Arc<dyn TeacherDirectory> = store;
                (announcements, teachers)
            }
        };

    metrics::start(announcements.clone());

    let state = AppState {
        announcements,
        teachers,
    };

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.app_base_url));

    let addr = format!("{}:{}", config.host, config.port);
    info!("Announcements API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
