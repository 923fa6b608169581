//! Configuration parsing for box counting runs.

use anyhow::{Context, Result};
use fractal_dim::{FractalDimensionSettings, RadiusBound, MAX_THREADS};
use serde::Deserialize;
use std::path::Path;

/// Root configuration of a run.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Statistic parameters.
	pub statistic: FractalDimensionSettings,
	/// Output options.
	pub output: OutputConfig,
}

/// How results are printed.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
	/// Print the report as JSON instead of text.
	pub json: bool,
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate TOML text.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config =
			toml::from_str(content).with_context(|| "Failed to parse config TOML")?;
		config.validate()?;
		Ok(config)
	}

	/// Reject settings the statistic would refuse anyway, before reading the graph.
	pub fn validate(&self) -> Result<()> {
		let settings = &self.statistic;

		if let (RadiusBound::Fixed(min), RadiusBound::Fixed(max)) =
			(settings.min_radius, settings.max_radius)
		{
			if min > max {
				anyhow::bail!("min_radius ({min}) must not exceed max_radius ({max})");
			}
		}
		if !settings.use_all_cores && settings.cores > MAX_THREADS {
			anyhow::bail!(
				"cores must be at most {MAX_THREADS}, got {}",
				settings.cores
			);
		}
		let base = settings.log_base;
		if !base.is_finite() || base <= 0.0 || base == 1.0 {
			anyhow::bail!("log_base must be > 0 and != 1, got {base}");
		}

		Ok(())
	}
}
