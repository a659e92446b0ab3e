//! Run the sky scene under a scripted motion profile and dump frames.
//!
//! Usage:
//! ```
//! cargo run --bin sphere_view -- --ticks 200 --profile tumble --out frames/
//! ```
//! See --help for all options.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use skysphere::{FrameBuffer, SceneConfig, SkyScene, YawSource};
use skysphere_harness::{
    run_scene, Jittered, MotionProfile, PitchSweep, RunnerResults, SteadyHold, Tumble,
};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
enum Profile {
    /// Hold level and still
    Steady,
    /// Sinusoidal pitch oscillation
    PitchSweep,
    /// Constant side tilt with a walking compass heading
    Tumble,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Steady => write!(f, "steady"),
            Profile::PitchSweep => write!(f, "pitch-sweep"),
            Profile::Tumble => write!(f, "tumble"),
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum YawMode {
    /// Accumulate yaw from device tilt
    DeadReckoned,
    /// Follow the compass while near portrait
    CompassGated,
}

impl std::fmt::Display for YawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YawMode::DeadReckoned => write!(f, "dead-reckoned"),
            YawMode::CompassGated => write!(f, "compass-gated"),
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    name = "sphere_view",
    about = "Renders the simulated celestial sphere under scripted motion",
    long_about = None
)]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Motion profile driving the sensors
    #[arg(long, value_enum, default_value_t = Profile::Tumble)]
    profile: Profile,

    /// Yaw update policy
    #[arg(long, value_enum, default_value_t = YawMode::DeadReckoned)]
    yaw: YawMode,

    /// Initial zoom exponent (overrides the config file)
    #[arg(long)]
    zoom: Option<i8>,

    /// Scene config JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gaussian sensor jitter sigma, raw accelerometer units
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,

    /// RNG seed for the jitter stream
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write every Nth frame as PNG (0 disables output)
    #[arg(long, default_value_t = 0)]
    every: u64,

    /// Output directory for PNG frames
    #[arg(long, default_value = "frames")]
    out: PathBuf,
}

/// Decode a 2-bit-per-channel palette value to 8-bit RGB.
fn palette_rgb(value: u8) -> image::Rgb<u8> {
    let channel = |shift: u8| ((value >> shift) & 0b11) * 85;
    image::Rgb([channel(4), channel(2), channel(0)])
}

fn save_frame(frame: &FrameBuffer, path: &PathBuf) -> Result<()> {
    let mut img = image::RgbImage::new(frame.width() as u32, frame.height() as u32);
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            img.put_pixel(x as u32, y as u32, palette_rgb(frame.pixel(x, y)));
        }
    }
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))
}

fn build_profile(args: &Args) -> Box<dyn MotionProfile> {
    fn wrap<P: MotionProfile + 'static>(profile: P, args: &Args) -> Box<dyn MotionProfile> {
        if args.jitter > 0.0 {
            Box::new(Jittered::new(profile, args.jitter, args.seed))
        } else {
            Box::new(profile)
        }
    }
    match args.profile {
        Profile::Steady => wrap(SteadyHold::level(), args),
        Profile::PitchSweep => wrap(PitchSweep::new(800, 120), args),
        Profile::Tumble => wrap(Tumble::new(400, 48), args),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<SceneConfig>(&text).context("parsing scene config")?
        }
        None => SceneConfig::default(),
    };
    if let Some(zoom) = args.zoom {
        config.zoom = zoom;
    }
    config.yaw_source = match args.yaw {
        YawMode::DeadReckoned => YawSource::DeadReckoned { rate_shift: 4 },
        YawMode::CompassGated => YawSource::CompassGated { portrait_band: 4096 },
    };

    let mut scene = SkyScene::new(config)?;
    let mut profile = build_profile(&args);
    info!(
        "running {} ticks of '{}' with {} catalog points",
        args.ticks,
        profile.description(),
        scene.catalog().len()
    );

    let results: RunnerResults = if args.every > 0 {
        fs::create_dir_all(&args.out)
            .with_context(|| format!("creating {}", args.out.display()))?;
        // Dump frames as we go: re-run the tick loop by hand so we can
        // save between renders.
        let mut overlay_frames = 0;
        for tick in 0..args.ticks {
            let frame = profile.sample(tick);
            let mut snapshot = skysphere::StaticSensor {
                accel: frame.accel,
                compass: frame.compass,
            };
            scene.tick(&mut snapshot);
            scene.render();
            if scene.overlay_drawn() {
                overlay_frames += 1;
            }
            if tick % args.every == 0 {
                let path = args.out.join(format!("frame_{tick:05}.png"));
                save_frame(scene.frame(), &path)?;
            }
        }
        RunnerResults {
            ticks: args.ticks,
            overlay_frames,
            final_dots: scene.dots_drawn(),
            final_pose: *scene.pose(),
            final_readout: scene.readout(),
        }
    } else {
        run_scene(&mut scene, profile.as_mut(), args.ticks)
    };

    let readout = results.final_readout;
    info!(
        "done: {} ticks, overlay in {} frames, {} dots in final frame",
        results.ticks, results.overlay_frames, results.final_dots
    );
    info!(
        "facing ra {}°, dec {}° at zoom {} (pitch {}, roll {}, yaw {})",
        readout.ra_deg, readout.dec_deg, readout.zoom, readout.pitch, readout.roll, readout.yaw
    );
    Ok(())
}
