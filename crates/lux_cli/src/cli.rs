use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lux_renderer::RenderConfig;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lux")]
#[command(about = "Monte Carlo path tracer for sphere scenes")]
pub struct Args {
    /// Scene description (JSON). The built-in reference scene is used if omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output file (.ppm or .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Supersample passes (samples per pixel)
    #[arg(long, short = 's')]
    pub passes: Option<u32>,

    /// Seed for the random number generators
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (0 = one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Gamma exponent applied before output (1.0 keeps the image linear)
    #[arg(long)]
    pub gamma: Option<f32>,

    /// Bounce ceiling for a single path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Override `config` with every option given on the command line.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(passes) = self.passes {
            config.passes = passes;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(max_depth) = self.max_depth {
            config.integrator.max_depth = max_depth;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_config_untouched() {
        let args = Args::parse_from(["lux"]);
        let mut config = RenderConfig::default();
        args.apply(&mut config);

        assert_eq!(config, RenderConfig::default());
        assert_eq!(args.output, PathBuf::from("output.ppm"));
        assert!(args.scene.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "lux", "--width", "64", "--height", "32", "-s", "3", "--seed", "9", "-j", "2",
            "--gamma", "1.0", "--max-depth", "16", "-o", "out.png", "--log-level", "debug",
        ]);
        let mut config = RenderConfig::default();
        args.apply(&mut config);

        assert_eq!((config.width, config.height), (64, 32));
        assert_eq!(config.passes, 3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.threads, 2);
        assert_eq!(config.gamma, 1.0);
        assert_eq!(config.integrator.max_depth, 16);
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
