//! Capture Session CLI
//!
//! Drives a capture session from a scripted or interactive list of
//! events, using a mock camera unless a hardware device is requested.

use capture_session::{
    capture::{Camera, CameraSource, CaptureConfig, CapturedImage, MockCamera},
    config::FileConfig,
    driver::{self, HostInput},
    metrics::{MetricsRegistry, MetricsSnapshot},
    session::{ControlSet, EventKind, SessionState, SessionStateMachine},
};
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "capture-session", version, about = "Run a photo capture session")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of images to collect.
    #[arg(short, long)]
    limit: Option<u32>,

    /// Require each capture to be confirmed (`--confirm false` turns it off).
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    confirm: Option<bool>,

    /// Comma-separated events (capture, confirm, retake, flip, cancel).
    /// Events are read from stdin, one per line, when omitted.
    #[arg(short, long, value_delimiter = ',')]
    script: Option<Vec<EventKind>>,

    /// Print Prometheus metrics when the session ends.
    #[arg(long)]
    metrics: bool,

    /// Seed for the mock camera.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Capture from hardware cameras instead of the mock.
    #[cfg(feature = "camera")]
    #[arg(long)]
    device: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    info!("Capture Session v{}", capture_session::VERSION);

    let file_config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let session_config = match file_config.session.with_overrides(cli.confirm, cli.limit) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid session configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut camera = open_camera(&cli, &file_config.capture);
    let print_metrics = cli.metrics || file_config.output.print_metrics;

    let delivered: Rc<RefCell<Option<Vec<CapturedImage>>>> = Rc::default();
    let sink = Rc::clone(&delivered);
    let mut session = SessionStateMachine::new(session_config, move |images| {
        *sink.borrow_mut() = Some(images);
    })
    .with_observer(|state: &SessionState| {
        info!(
            phase = %state.phase(),
            source = %state.source(),
            accepted = state.accepted_images().len(),
            controls = ?ControlSet::for_phase(state.phase()),
            "Session state changed"
        );
    });

    info!(
        capture_limit = session_config.capture_limit(),
        confirmation_required = session_config.confirmation_required(),
        "Session presented"
    );

    let (inputs, received) = mpsc::channel();
    let interrupts = inputs.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = interrupts.send(HostInput::Interrupt);
    }) {
        warn!("Failed to install Ctrl-C handler: {}", e);
    }

    match cli.script.clone() {
        Some(script) => {
            for kind in script {
                let _ = inputs.send(HostInput::Event(kind));
            }
            let _ = inputs.send(HostInput::Closed);
        }
        None => {
            println!("Enter events: capture, confirm, retake, flip, cancel");
            thread::spawn(move || driver::forward_lines(std::io::stdin().lock(), inputs));
        }
    }

    let end = driver::drive(&mut session, camera.as_mut(), received.iter());
    info!(?end, "Event loop stopped");
    camera.close();

    let images = delivered.borrow_mut().take().unwrap_or_default();
    info!(
        outcome = ?session.outcome(),
        images = images.len(),
        "Session ended"
    );
    for image in &images {
        println!(
            "#{} {} {}x{} {} {}",
            image.sequence(),
            image.source(),
            image.width(),
            image.height(),
            image.captured_at().to_rfc3339(),
            image.fingerprint().to_hex()
        );
    }

    if print_metrics {
        match MetricsRegistry::new() {
            Ok(registry) => {
                registry.update(&MetricsSnapshot::from_session(&session));
                if let Some(outcome) = session.outcome() {
                    registry.record_session(outcome, &session.stats());
                }
                match registry.encode() {
                    Ok(output) => print!("{}", output),
                    Err(e) => warn!("Failed to encode metrics: {}", e),
                }
            }
            Err(e) => warn!("Failed to create metrics registry: {}", e),
        }
    }
}

fn open_camera(cli: &Cli, config: &CaptureConfig) -> Box<dyn Camera> {
    #[cfg(feature = "camera")]
    let mut camera: Box<dyn Camera> = if cli.device {
        Box::new(capture_session::capture::DeviceCamera::new())
    } else {
        Box::new(MockCamera::with_seed(cli.seed))
    };
    #[cfg(not(feature = "camera"))]
    let mut camera: Box<dyn Camera> = Box::new(MockCamera::with_seed(cli.seed));

    if let Err(e) = camera.open(config) {
        eprintln!("Failed to open camera: {}", e);
        std::process::exit(1);
    }
    info!(
        back = config.device_for(CameraSource::Back),
        front = config.device_for(CameraSource::Front),
        "Camera opened"
    );
    camera
}
