use clap::{Parser, Subcommand};
use flywheel::control::{ControlCommand, SOCKET_PATH};
use flywheel::{Direction, Label, Tuning, WedgeList, Wheel, WheelEvent};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::time::Duration;

/// Upper bound on simulated frames; a throw at max speed settles long before.
const MAX_FRAMES: u32 = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "flywheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the wheel overlay
    Show,
    /// Hide the wheel overlay
    Hide,
    /// Show the overlay if hidden, hide it otherwise
    Toggle,
    /// Throw the wheel as if released at VELOCITY rad/s
    Spin {
        #[arg(allow_negative_numbers = true)]
        velocity: Option<f64>,
    },
    /// Add a wedge
    Add { label: String },
    /// Remove the wedge under the pointer
    Remove,
    /// Run a throw without a display and print where it lands
    Simulate {
        /// Release velocity in rad/s (clamped like a real throw)
        #[arg(short, long, allow_negative_numbers = true)]
        velocity: f64,

        /// Starting rotation in radians
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        angle: f64,

        /// Simulated frame rate
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Wedge label; repeat for each wedge (defaults to the built-in names)
        #[arg(short = 'w', long = "wedge")]
        wedges: Vec<String>,

        /// Where the pointer sits (north, ne, east, ...)
        #[arg(short, long, default_value_t = Direction::North)]
        pointer: Direction,

        /// Print every frame
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show => send_command(&ControlCommand::Show),
        Commands::Hide => send_command(&ControlCommand::Hide),
        Commands::Toggle => send_command(&ControlCommand::Toggle),
        Commands::Spin { velocity } => send_command(&ControlCommand::Spin(velocity)),
        Commands::Add { label } => send_command(&ControlCommand::Add(Label::parse(&label)?)),
        Commands::Remove => send_command(&ControlCommand::Remove),
        Commands::Simulate {
            velocity,
            angle,
            fps,
            wedges,
            pointer,
            trace,
        } => simulate(velocity, angle, fps, wedges, pointer, trace),
    }
}

fn simulate(
    velocity: f64,
    angle: f64,
    fps: u32,
    wedges: Vec<String>,
    pointer: Direction,
    trace: bool,
) -> anyhow::Result<()> {
    if fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }

    let wedges = if wedges.is_empty() {
        WedgeList::defaults()
    } else {
        WedgeList::parse_all(&wedges)
    };
    let mut wheel = Wheel::new(wedges, Tuning::default(), pointer).with_angle(angle);

    let frame = Duration::from_secs_f64(1.0 / fps as f64);
    let mut now = Duration::ZERO;
    let mut frames = 0u32;

    let mut action = wheel.fling(velocity);
    match &action.event {
        Some(WheelEvent::SpinStarted(params)) => println!(
            "throw: {:.3} rad/s, deceleration {:.3} rad/s², expected {:.3}s",
            params.initial_velocity, params.deceleration, params.duration
        ),
        _ => println!("throw too slow to spin; wheel stays put"),
    }

    while action.should_tick && frames < MAX_FRAMES {
        action = wheel.tick(now);
        if trace {
            println!(
                "{:>6} t={:>7.3}s angle={:>9.4} v={:>8.4} {}",
                frames,
                now.as_secs_f64(),
                wheel.angle(),
                wheel.velocity(),
                wheel.current().map(Label::as_str).unwrap_or("—"),
            );
        }
        now += frame;
        frames += 1;
    }

    println!("frames: {frames}");
    println!("elapsed: {:.3}s", frames.saturating_sub(1) as f64 / fps as f64);
    println!("angle: {:.4} rad", wheel.angle());
    match wheel.current() {
        Some(label) => println!("result: {label}"),
        None => println!("result: —"),
    }
    Ok(())
}

fn send_command(cmd: &ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to spindle at {}: {}. Is spindle running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
