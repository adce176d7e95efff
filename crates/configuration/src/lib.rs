// Declare the modules that make up this crate.
pub mod assumptions;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use assumptions::{AssumptionOverrides, Assumptions};
pub use error::ConfigError;
pub use settings::{
    EngineConfig, FinancingDefaults, HouseHackDefaults, OperatingDefaults, RefinanceDefaults,
    RehabDefaults, ScoringSettings, ShortTermDefaults, SolverSettings, TargetThresholds,
    WholesaleDefaults, DEFAULTS_VERSION,
};

/// Loads the engine configuration, layering an optional `dealscope.toml`
/// over the compiled-in default table.
///
/// A missing file is not an error: the platform defaults are a complete,
/// valid configuration on their own.
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("dealscope").required(false))
        .build()?;

    let config = builder.try_deserialize::<EngineConfig>()?;
    config.validate()?;

    tracing::debug!(version = %config.version, "engine configuration loaded");
    Ok(config)
}
