mod bootstrap;
mod config;
mod loop_runner;
mod scenario;

pub(crate) fn run() -> Result<(), config::ConfigLoadError> {
    let wiring = bootstrap::build_app()?;
    loop_runner::run_headless(&wiring.config, &wiring.script)?;
    Ok(())
}
