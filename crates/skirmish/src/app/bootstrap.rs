use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::{ConfigLoadError, SkirmishConfig, CONFIG_ENV_VAR};
use super::scenario::{self, ScriptStep};

pub(crate) struct AppWiring {
    pub(crate) config: SkirmishConfig,
    pub(crate) script: Vec<(u32, ScriptStep)>,
}

pub(crate) fn build_app() -> Result<AppWiring, ConfigLoadError> {
    init_tracing();
    info!("=== Skirmish Startup ===");

    let config = SkirmishConfig::from_env()?;
    info!(
        source = %std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| "defaults".to_string()),
        map_width_cells = config.map_width_cells,
        map_height_cells = config.map_height_cells,
        viewport_width = config.battlefield.viewport_width,
        viewport_height = config.battlefield.viewport_height,
        "config_loaded"
    );

    Ok(AppWiring {
        config,
        script: scenario::default_script(),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
