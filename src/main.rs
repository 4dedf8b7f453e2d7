use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use poseplay::actuator::SimulatedActuator;
use poseplay::config::ArmConfig;
use poseplay::controller::ArmController;
use poseplay::core::Joint;
use poseplay::dispatch::{dispatch, Command, Outcome, HELP};
use poseplay::motion::{CancelToken, Sleeper, ThreadSleeper};
use poseplay::sequence::ReplayMode;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Writes kept by the simulated actuator during an interactive session.
const WRITE_LOG_LIMIT: usize = 256;

/// Log filter applied on top of `RUST_LOG`; keeps `info!` out of the raw
/// terminal.
const DEFAULT_LOG_DIRECTIVE: &str = "warn";

/// Keyboard teleoperation for a 4-DOF servo arm.
#[derive(Debug, Parser)]
#[command(name = "poseplay", version, about)]
struct Args {
    /// JSON config file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sequence file to save to and replay from
    #[arg(short, long)]
    sequence: Option<PathBuf>,

    /// Move all joints together during replay
    #[arg(long)]
    interleaved: bool,

    /// Interpolation steps per move
    #[arg(long)]
    steps: Option<u32>,

    /// Seconds per single-joint move
    #[arg(long)]
    duration: Option<f64>,

    /// Do not drive the joints to their start angles on launch
    #[arg(long)]
    no_home: bool,
}

impl Args {
    fn into_config(self) -> Result<ArmConfig> {
        let mut config = match &self.config {
            Some(path) => ArmConfig::load(path)?,
            None => ArmConfig::default(),
        };
        if let Some(path) = self.sequence {
            config.sequence_path = path;
        }
        if self.interleaved {
            config.replay_mode = ReplayMode::Interleaved;
        }
        if let Some(steps) = self.steps {
            config.trajectory_steps = steps;
        }
        if let Some(duration) = self.duration {
            config.trajectory_duration_secs = duration;
        }
        if self.no_home {
            config.home_on_start = false;
        }
        Ok(config)
    }
}

/// Sleeper that keeps reading the keyboard while motion waits.
///
/// Esc cancels the motion in flight. Ctrl-C or Ctrl-D cancels it and asks the
/// input loop to quit. Every other key is dropped so commands never queue up
/// behind a running move.
struct TerminalSleeper {
    cancel: CancelToken,
    quit: bool,
}

impl TerminalSleeper {
    fn new() -> Self {
        Self {
            cancel: CancelToken::new(),
            quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if is_quit(&key) {
            self.quit = true;
            self.cancel.cancel();
        } else if key.code == KeyCode::Esc {
            self.cancel.cancel();
        }
    }
}

impl Sleeper for TerminalSleeper {
    fn sleep(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return;
            }
            match event::poll(remaining) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.on_key(key),
                    Ok(_) => {}
                    Err(err) => tracing::warn!(error = %err, "terminal read failed"),
                },
                Ok(false) => return,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal poll failed");
                    ThreadSleeper.sleep(remaining);
                    return;
                }
            }
        }
    }
}

/// Leaves raw mode when dropped, including on early return.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enter raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            eprintln!("failed to restore terminal: {err}");
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

/// Print one operator line; raw mode needs an explicit carriage return.
fn say(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for line in text.lines() {
        write!(out, "{line}\r\n")?;
    }
    out.flush()
}

type Controller = ArmController<SimulatedActuator, TerminalSleeper>;

fn arm_status(controller: &Controller) -> String {
    let rig = controller.rig();
    let angles: Vec<String> = Joint::ALL
        .iter()
        .map(|&joint| format!("{joint}={:.1}", rig.observed_angle(joint)))
        .collect();
    format!("Arm at {}", angles.join(" "))
}

fn run(controller: &mut Controller) -> Result<()> {
    say(HELP)?;
    say("")?;
    say(&arm_status(controller))?;

    loop {
        if controller.rig().sleeper.quit {
            break;
        }

        let Event::Key(key) = event::read().context("failed to read terminal input")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_quit(&key) {
            break;
        }
        let KeyCode::Char(ch) = key.code else {
            continue;
        };
        let Some(command) = Command::from_key(ch) else {
            continue;
        };

        let outcome = dispatch(controller, command);
        say(&outcome.to_string())?;
        if matches!(outcome, Outcome::Replayed { .. } | Outcome::Interrupted { .. }) {
            say(&arm_status(controller))?;
        }
    }

    say("Bye")?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(DEFAULT_LOG_DIRECTIVE.parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let config = Args::parse().into_config()?;
    let calibration = config.calibration;
    let home_on_start = config.home_on_start;

    let mut controller = ArmController::builder()
        .actuator(
            SimulatedActuator::new()
                .with_calibration(calibration)
                .with_write_log_limit(WRITE_LOG_LIMIT),
        )
        .sleeper(TerminalSleeper::new())
        .config(config)
        .build()
        .context("failed to build arm controller")?;

    let cancel = controller.cancel_token();
    controller.rig_mut().sleeper.cancel = cancel;

    if home_on_start {
        controller.home().context("failed to home arm")?;
    }
    tracing::info!(
        sequence = %controller.store().path().display(),
        mode = ?controller.config().replay_mode,
        "arm ready"
    );

    let _raw = RawMode::enable()?;
    run(&mut controller)
}
