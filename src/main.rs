//! Brewlab - A drift-resistant brew timer service
//! 
//! This is the main entry point for the brewlab application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use brewlab::{
    config::Config,
    state::{AppState, EngineKind},
    api::create_router,
    recipes::RecipeBook,
    services::Notifier,
    tasks::{feedback_task, tick_sampler_task},
    timer::SystemClock,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("brewlab={},tower_http=info", config.log_level()))
        .init();

    info!("Starting brewlab server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, recipes={}, tick={}ms",
          config.host, config.port, config.recipes.display(), config.tick_period().as_millis());

    let recipes = RecipeBook::load(&config.recipes).await?;

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        Arc::new(SystemClock),
        recipes,
    ));

    // One sampler per engine; each idles until its engine runs
    for engine in [EngineKind::Brew, EngineKind::Knob] {
        let sampler_state = Arc::clone(&state);
        let period = config.tick_period();
        tokio::spawn(async move {
            tick_sampler_task(sampler_state, engine, period).await;
        });
    }

    // Start the feedback task that renders emitted signals
    let feedback_state = Arc::clone(&state);
    let notifier = Notifier::new(config.notify_command.clone());
    tokio::spawn(async move {
        feedback_task(feedback_state, notifier).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /recipes                - List recipes");
    info!("  POST /brew/attach/:recipe_id - Load a recipe into the brew timer");
    info!("  POST /brew/{{start,pause,next,prev,reset-step,reset}}");
    info!("  POST /brew/jump/:index       - Jump to a step");
    info!("  GET  /brew                   - Brew timer status");
    info!("  POST /knob/{{configure,start,pause,reset}}");
    info!("  GET  /knob                   - Knob timer status");
    info!("  GET  /health                 - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
