use publisher_service::config::Config;
use publisher_service::db;
use publisher_service::jobs::scheduler;
use publisher_service::models::PlatformKind;
use publisher_service::platforms::{
    MockBehavior, MockPlatformClient, PlatformError, PlatformRegistry,
};
use publisher_service::queue::{self, InMemoryJobQueue, JobQueue};
use publisher_service::services::PublishService;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,publisher_service=debug".into()),
        )
        .init();

    info!("Starting publisher service");

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    info!(
        env = %config.app.env,
        poll_interval_secs = config.scheduler.poll_interval_secs,
        "Configuration loaded"
    );

    // Initialize database
    let db_pool = db::create_pool(&config.database).await?;
    info!("Successfully connected to database");

    sqlx::migrate!("./migrations").run(&db_pool).await?;
    info!("Database migrations applied");

    // Platform adapter registry: one mock integration per supported kind,
    // with simulated outages for any kind named in MOCK_PLATFORM_FAILURES
    let registry = Arc::new(build_registry(&config.platforms.simulate_failures));

    // Publish queue and worker
    let (job_queue, job_rx) = InMemoryJobQueue::new();
    let publish_service = Arc::new(PublishService::new(db_pool.clone(), registry));
    tokio::spawn(queue::run_publish_worker(job_rx, publish_service));

    // Due-post scanner loop
    let scanner_queue: Arc<dyn JobQueue> = Arc::new(job_queue);
    tokio::spawn(scheduler::run_scheduler(
        db_pool,
        scanner_queue,
        Duration::from_secs(config.scheduler.poll_interval_secs),
    ));

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    Ok(())
}

fn build_registry(simulate_failures: &[String]) -> PlatformRegistry {
    let mut registry = PlatformRegistry::new();

    for kind in PlatformKind::ALL {
        let behavior = if simulate_failures.iter().any(|s| s == kind.as_str()) {
            info!(platform = kind.as_str(), "Simulating outage for platform");
            MockBehavior::Error(PlatformError::Unreachable("simulated outage".to_string()))
        } else {
            MockBehavior::Succeed
        };
        registry.register(
            kind,
            Arc::new(MockPlatformClient::with_behavior(kind, behavior)),
        );
    }

    registry
}
