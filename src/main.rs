use anyhow::Result;
use civiccare::application::{
    ports::{
        notification::Notifier,
        report::ReportRenderer,
        security::{PasswordHasher, TokenManager},
        storage::ImageStore,
        time::Clock,
    },
    services::{ApplicationServices, Collaborators, Repositories},
};
use civiccare::config::AppConfig;
use civiccare::infrastructure::{
    database,
    notification::LoggingNotifier,
    report::PdfReportRenderer,
    repositories::{
        PostgresFeedbackRepository, PostgresIssueReadRepository, PostgresIssueWriteRepository,
        PostgresStatusLedger, PostgresUserRepository,
    },
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    seed::DemoSeeder,
    storage::LocalImageStore,
    time::SystemClock,
};
use civiccare::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let repos = Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        issue_writes: Arc::new(PostgresIssueWriteRepository::new(pool.clone())),
        issue_reads: Arc::new(PostgresIssueReadRepository::new(pool.clone())),
        ledger: Arc::new(PostgresStatusLedger::new(pool.clone())),
        feedback: Arc::new(PostgresFeedbackRepository::new(pool)),
    };

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let image_store: Arc<dyn ImageStore> = Arc::new(LocalImageStore::new(
        config.upload_dir().clone(),
        config.max_upload_bytes(),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(LoggingNotifier::new(
        config.notify_sender(),
        config.notifications_enabled(),
    ));
    let renderer: Arc<dyn ReportRenderer> = Arc::new(PdfReportRenderer::default());

    if config.seed_demo_data() {
        DemoSeeder {
            users: repos.users.as_ref(),
            issue_reads: repos.issue_reads.as_ref(),
            issue_writes: repos.issue_writes.as_ref(),
            hasher: password_hasher.as_ref(),
            clock: clock.as_ref(),
        }
        .run()
        .await?;
    }

    let services = Arc::new(ApplicationServices::new(
        repos,
        Collaborators {
            password_hasher,
            token_manager,
            image_store,
            notifier,
            renderer,
            clock,
        },
    ));

    let state = HttpState { services };
    let app = build_router(state, &RouterOptions::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(%address, uploads = %config.upload_dir().display(), "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
