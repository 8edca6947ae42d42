//! Scripted demo: opens, delays and closes a few windows and logs the
//! animated values every few frames.
//!
//! Usage: `winanim [options.toml] [--realtime]`. Without `--realtime` the
//! frames run against a manual clock as fast as possible.

use std::path::Path;
use std::time::Duration;

use winanim::animation::{
    AnimationScheduler, AnimationSpec, Attribute, FPx2, WindowId,
};
use winanim::options::Options;
use winanim::util::clock::{Clock, ManualClock, SystemClock};
use winanim::util::easing::EasingFunction;
use winanim::util::frame_timing::FrameTiming;
use winanim::AnimError;

/// Simulated frame length (~60 fps).
const FRAME_MS: u64 = 16;
const MAX_FRAMES: u32 = 240;

fn load_options(path: Option<&str>) -> Result<Options, AnimError> {
    match path {
        Some(path) => {
            let options = Options::load(Path::new(&path))?;
            log::info!("Loaded options from '{path}'");
            for name in options.preset_names() {
                log::debug!("preset '{name}' available");
            }
            Ok(options)
        }
        None => Ok(Options::default()),
    }
}

/// Preset by name, or `fallback` when the options file does not define it.
fn preset_or(options: &Options, name: &str, fallback: AnimationSpec) -> AnimationSpec {
    options.preset(name).cloned().unwrap_or(fallback)
}

/// Run the script, calling `next_frame` to obtain each frame's delta.
fn run<C: Clock>(
    mut scheduler: AnimationScheduler<C>,
    options: &Options,
    mut next_frame: impl FnMut() -> u64,
) -> Result<(), AnimError> {
    let fade_in = preset_or(
        options,
        "fade_in",
        AnimationSpec::new(Attribute::Opacity, 200, FPx2::splat(1.0))
            .with_from(FPx2::splat(0.0))
            .with_curve(EasingFunction::QuadraticOut),
    );
    let pop_in = preset_or(
        options,
        "pop_in",
        AnimationSpec::new(Attribute::Scale, 250, FPx2::splat(1.0))
            .with_from(FPx2::splat(0.8))
            .with_curve(EasingFunction::EASE_IN_OUT),
    );
    let fade_out = preset_or(
        options,
        "fade_out",
        AnimationSpec::new(Attribute::Opacity, 300, FPx2::splat(0.0))
            .with_from(FPx2::splat(1.0))
            .keeping_at_target(),
    );

    let opening = WindowId(1);
    let delayed = WindowId(2);
    let closing = WindowId(3);

    let _ = scheduler.animate(opening, &fade_in)?;
    let _ = scheduler.animate(opening, &pop_in)?;
    let _ = scheduler.animate(delayed, &fade_in.clone().with_delay(100).waiting_at_source())?;
    let _ = scheduler.animate(closing, &fade_out)?;

    for frame in 0..MAX_FRAMES {
        // the first window is closed again while still opening
        if frame == 6 {
            let _ = scheduler.animate(opening, &fade_out)?;
        }

        let delta_ms = next_frame();
        let animating = scheduler.tick(delta_ms);

        if frame % 5 == 0 {
            for window in scheduler.active_windows() {
                let values = scheduler.values_for(window);
                let summary: Vec<String> = values
                    .iter()
                    .map(|(attribute, value)| format!("{attribute}={value}"))
                    .collect();
                log::info!(
                    "t={}ms {window}: {}",
                    scheduler.clock().now_ms(),
                    summary.join(" ")
                );
            }
        }

        if !animating {
            log::info!("all animations settled after {} frames", frame + 1);
            break;
        }
    }

    for window in scheduler.active_windows() {
        log::debug!("held on {window}:\n{}", scheduler.describe_window(window));
        let _ = scheduler.cancel_window(window);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let realtime = args.iter().any(|arg| arg == "--realtime");
    let path = args.iter().find(|arg| !arg.starts_with("--"));

    let result = load_options(path.map(String::as_str)).and_then(|options| {
        if realtime {
            let scheduler =
                AnimationScheduler::with_options(SystemClock::new(), &options)?;
            let mut timing = FrameTiming::new(60);
            run(scheduler, &options, || {
                while !timing.should_render() {
                    std::thread::sleep(Duration::from_millis(1));
                }
                let delta_ms = timing.end_frame();
                log::trace!("frame {delta_ms}ms, {:.1} fps", timing.fps());
                delta_ms
            })
        } else {
            let clock = ManualClock::new(0);
            let scheduler =
                AnimationScheduler::with_options(clock.clone(), &options)?;
            run(scheduler, &options, || {
                clock.advance(FRAME_MS);
                FRAME_MS
            })
        }
    });
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
