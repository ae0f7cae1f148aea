//! One popup, from message tokens to exit outcome.

use crate::cli::Options;
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::Lifecycle::{event_loop, signals, ExitOutcome, Lifecycle};
use crate::Shell::color::parse_hex_color;
use crate::Shell::x11::{Palette, PopupSpec, X11Shell};
use crate::Stack::CoordinatorBuilder;
use crate::Text::{wrap_tokens, LayoutMetrics};

fn palette(config: &Config) -> Result<Palette> {
    Ok(Palette {
        background: parse_hex_color(&config.background_color)?,
        border: parse_hex_color(&config.border_color)?,
        foreground: parse_hex_color(&config.font_color)?,
    })
}

/// Show the popup described by `options` and block until it closes.
///
/// The stacking claim is given back on every path once it has been made,
/// including display failures after the claim.
pub fn run(options: Options) -> Result<ExitOutcome> {
    signals::install_early()?;

    let config = config::load(options.config_path.as_deref())?;
    let palette = palette(&config)?;
    let shell = X11Shell::connect(&config.font)?;

    let font = shell.font_metrics().clone();
    let budget = LayoutMetrics::text_width_budget(config.width, config.padding);
    let lines = wrap_tokens(&options.message, budget, &font);
    let metrics = LayoutMetrics {
        line_count: u32::try_from(lines.len()).unwrap_or(u32::MAX),
        line_height: font.line_height(),
        ascent: font.ascent,
        line_spacing: config.line_spacing,
        padding: config.padding,
        width: config.width,
    };

    let mut coordinator = CoordinatorBuilder::new()
        .with_key(config.stack.key)
        .with_gap(config.padding)
        .with_policy(config.stack.release)
        .build()
        .map_err(|e| Error::SharedMemory(e.to_string()))?;
    let claim = coordinator
        .claim(metrics.height())
        .map_err(|e| Error::SharedMemory(e.to_string()))?;

    let origin = config
        .placement()
        .origin(shell.screen_size(), metrics.size(), claim.offset());
    tracing::debug!(?claim, ?origin, lines = lines.len(), "popup placed");

    let spec = PopupSpec {
        origin,
        metrics,
        border_size: config.border_size,
        palette,
        lines,
    };
    let outcome = show(shell, spec, options.duration_or(config.duration), &config);

    match coordinator.release() {
        Ok(true) => tracing::debug!("last popup out, stacking segment removed"),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "failed to remove stacking segment"),
    }

    outcome
}

fn show(shell: X11Shell, spec: PopupSpec, duration: u32, config: &Config) -> Result<ExitOutcome> {
    let mut popup = shell.open_popup(spec)?;
    let _armed = signals::arm(Box::new(popup.poster()))?;
    signals::arm_timer(duration);

    let mut lifecycle = Lifecycle::new(config.bindings());
    event_loop::run(&mut popup, &mut lifecycle)
}
