//! Command line and the engine configs derived from it.

use clap::Parser;
use meadow_engine::device::GpuInit;
use meadow_engine::logging::LoggingConfig;
use meadow_engine::scene::DisplayMode;
use meadow_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

#[derive(Parser, Debug)]
#[command(name = "meadow", version, about = "Animated 2D landscape drawn through a transform stack")]
pub struct StudioArgs {
    /// Initial display mode (solid, wireframe or point). Switch at runtime with S / W / P.
    #[arg(long, short, default_value_t = DisplayMode::Solid)]
    pub mode: DisplayMode,

    /// Window width in logical pixels.
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long)]
    pub log: Option<String>,

    /// Present as fast as possible instead of waiting for vertical sync.
    #[arg(long)]
    pub no_vsync: bool,
}

impl StudioArgs {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: window_title(self.mode),
            initial_size: LogicalSize::new(self.width as f64, self.height as f64),
            ..RuntimeConfig::default()
        }
    }

    /// Landscape colors are display values, so the surface stores them without an sRGB
    /// encode.
    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            prefer_srgb: false,
            ..GpuInit::default()
        }
        .with_vsync(!self.no_vsync)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        match &self.log {
            Some(filter) => LoggingConfig::with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }
}

pub fn window_title(mode: DisplayMode) -> String {
    format!("meadow ({mode})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<StudioArgs, clap::Error> {
        StudioArgs::try_parse_from(std::iter::once("meadow").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.mode, DisplayMode::Solid);
        assert_eq!((args.width, args.height), (800, 800));
        assert!(args.log.is_none());
        assert!(!args.no_vsync);
        assert!(parse(&["--no-vsync"]).unwrap().no_vsync);
    }

    #[test]
    fn mode_accepts_names_and_initials() {
        assert_eq!(parse(&["--mode", "wireframe"]).unwrap().mode, DisplayMode::Wireframe);
        assert_eq!(parse(&["-m", "p"]).unwrap().mode, DisplayMode::Point);
        assert!(parse(&["--mode", "shaded"]).is_err());
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(parse(&["--width", "0"]).is_err());
    }

    #[test]
    fn runtime_config_uses_size_and_mode() {
        let cfg = parse(&["--width", "640", "--height", "480", "--mode", "point"])
            .unwrap()
            .runtime_config();
        assert_eq!(cfg.initial_size, LogicalSize::new(640.0, 480.0));
        assert_eq!(cfg.title, "meadow (point)");
    }

    #[test]
    fn gpu_init_requests_a_non_srgb_surface() {
        let init = parse(&[]).unwrap().gpu_init();
        assert!(!init.prefer_srgb);
        assert!(!parse(&["--no-vsync"]).unwrap().gpu_init().prefer_srgb);
    }

    #[test]
    fn log_flag_becomes_filter() {
        let cfg = parse(&["--log", "meadow_engine=trace"]).unwrap().logging_config();
        assert_eq!(cfg.env_filter.as_deref(), Some("meadow_engine=trace"));
    }
}
