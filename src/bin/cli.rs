//! Tello CLI Client
//!
//! Command-line control surface for the vehicle.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use tello_command::config::{DEFAULT_HOST, DEFAULT_PORT};
use tello_command::protocol::{
    decode_command, parse_number, Command, ControlVerb, MoveDirection, Number, Range,
    RotateDirection, ANGLE_RANGE, DEFAULT_ANGLE_DEGREES, DEFAULT_DISTANCE_CM, DISTANCE_RANGE,
    SPEED_RANGE,
};
use tello_command::{Acknowledgment, Config, FlipDirection, Result, TelloClient, TelloError};
use tracing_subscriber::{fmt, EnvFilter};

/// Tello CLI
#[derive(Parser, Debug)]
#[command(name = "tello-cli")]
#[command(about = "Send commands to a Tello over its UDP command port")]
#[command(version)]
struct Args {
    /// Vehicle address
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Vehicle command port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Acknowledgment timeout in milliseconds (0 waits forever)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    /// Pull out-of-range values into range instead of rejecting them
    #[arg(long)]
    clamp: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take off
    Takeoff,
    /// Land
    Land,
    /// Stop motors immediately
    Emergency,
    /// Hover in place
    Stop,

    /// Fly up (cm, 20-500)
    Up { #[arg(default_value_t = DEFAULT_DISTANCE_CM.to_string())] cm: String },
    /// Fly down (cm, 20-500)
    Down { #[arg(default_value_t = DEFAULT_DISTANCE_CM.to_string())] cm: String },
    /// Fly left (cm, 20-500)
    Left { #[arg(default_value_t = DEFAULT_DISTANCE_CM.to_string())] cm: String },
    /// Fly right (cm, 20-500)
    Right { #[arg(default_value_t = DEFAULT_DISTANCE_CM.to_string())] cm: String },
    /// Fly forward (cm, 20-500)
    Forward { #[arg(default_value_t = DEFAULT_DISTANCE_CM.to_string())] cm: String },
    /// Fly back (cm, 20-500)
    Back { #[arg(default_value_t = DEFAULT_DISTANCE_CM.to_string())] cm: String },

    /// Rotate clockwise (degrees, 1-360)
    Cw { #[arg(default_value_t = DEFAULT_ANGLE_DEGREES.to_string())] degrees: String },
    /// Rotate counterclockwise (degrees, 1-360)
    Ccw { #[arg(default_value_t = DEFAULT_ANGLE_DEGREES.to_string())] degrees: String },

    /// Set speed (cm/s, 10-100)
    Speed { speed: String },

    /// Flip (l, r, f, b or left, right, forward, back)
    Flip { direction: String },

    /// Send text verbatim, without validation
    Raw { line: String },

    /// Read commands from stdin, one wire line per line
    Shell,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tello_command=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .response_timeout_ms(args.timeout_ms)
        .build();

    if let Err(e) = run(config, &args) {
        eprintln!("error: {}", e);
        std::process::exit(if e.is_input_error() { 2 } else { 1 });
    }
}

fn run(config: Config, args: &Args) -> Result<()> {
    // Validate before touching the network
    let command = match &args.command {
        Commands::Shell => None,
        Commands::Raw { .. } => None,
        other => Some(to_command(other, args.clamp)?),
    };

    let mut client = TelloClient::new(config);
    let ack = client.connect_and_initialize()?;
    tracing::info!("Command mode: {}", ack);

    let result = match (&args.command, command) {
        (Commands::Shell, _) => shell(&mut client, args.clamp),
        (Commands::Raw { line }, _) => client.send_command(line).map(|ack| println!("{}", ack)),
        (_, Some(command)) => execute(&mut client, command).map(|ack| println!("{}", ack)),
        (_, None) => Ok(()),
    };

    client.disconnect()?;
    result
}

/// Interpret a numeric argument, optionally clamping like a control surface
fn number(range: Range, input: &str, clamp: bool, default: i64) -> Result<Number> {
    match parse_number(range.param, input) {
        Ok(value) if clamp => Ok(range.clamp(value)),
        Ok(value) => Ok(value),
        Err(TelloError::NotANumber { .. }) if clamp => Ok(Number::Int(default)),
        Err(e) => Err(e),
    }
}

fn to_command(command: &Commands, clamp: bool) -> Result<Command> {
    let distance = |direction: MoveDirection, cm: &str| -> Result<Command> {
        Ok(Command::Move {
            direction,
            cm: number(DISTANCE_RANGE, cm, clamp, DEFAULT_DISTANCE_CM)?,
        })
    };
    let angle = |direction: RotateDirection, degrees: &str| -> Result<Command> {
        Ok(Command::Rotate {
            direction,
            degrees: number(ANGLE_RANGE, degrees, clamp, DEFAULT_ANGLE_DEGREES)?,
        })
    };

    match command {
        Commands::Takeoff => Ok(Command::Control(ControlVerb::Takeoff)),
        Commands::Land => Ok(Command::Control(ControlVerb::Land)),
        Commands::Emergency => Ok(Command::Control(ControlVerb::Emergency)),
        Commands::Stop => Ok(Command::Control(ControlVerb::Stop)),
        Commands::Up { cm } => distance(MoveDirection::Up, cm),
        Commands::Down { cm } => distance(MoveDirection::Down, cm),
        Commands::Left { cm } => distance(MoveDirection::Left, cm),
        Commands::Right { cm } => distance(MoveDirection::Right, cm),
        Commands::Forward { cm } => distance(MoveDirection::Forward, cm),
        Commands::Back { cm } => distance(MoveDirection::Back, cm),
        Commands::Cw { degrees } => angle(RotateDirection::Clockwise, degrees),
        Commands::Ccw { degrees } => angle(RotateDirection::CounterClockwise, degrees),
        Commands::Speed { speed } => Ok(Command::Speed {
            speed: number(SPEED_RANGE, speed, clamp, SPEED_RANGE.min)?,
        }),
        Commands::Flip { direction } => Ok(Command::Flip {
            direction: direction.parse::<FlipDirection>()?,
        }),
        Commands::Raw { .. } | Commands::Shell => Err(TelloError::Protocol(
            "not a single command".to_string(),
        )),
    }
}

/// Route a typed command to the matching client operation
fn execute(client: &mut TelloClient, command: Command) -> Result<Acknowledgment> {
    match command {
        Command::Control(ControlVerb::Command) => client.initialize_command_mode(),
        Command::Control(ControlVerb::Takeoff) => client.takeoff(),
        Command::Control(ControlVerb::Land) => client.land(),
        Command::Control(ControlVerb::Emergency) => client.emergency(),
        Command::Control(ControlVerb::Stop) => client.stop(),
        Command::Control(ControlVerb::StreamOn) => client.stream_on(),
        Command::Control(ControlVerb::StreamOff) => client.stream_off(),
        Command::Move { direction, cm } => client.fly(direction, cm),
        Command::Rotate { direction, degrees } => client.rotate(direction, degrees),
        Command::Speed { speed } => client.set_speed(speed),
        Command::Flip { direction } => client.flip(direction),
    }
}

fn shell(client: &mut TelloClient, clamp: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("tello> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();

        let result = match line {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            _ if line.starts_with("raw ") => client.send_command(&line[4..]),
            _ => shell_command(line, clamp).and_then(|command| execute(client, command)),
        };

        match result {
            Ok(ack) => println!("{}", ack),
            Err(e) if e.is_input_error() => println!("invalid: {}", e),
            Err(e) => {
                println!("failed: {}", e);
                if !e.is_timeout() {
                    return Err(e);
                }
            }
        }
    }
}

fn shell_command(line: &str, clamp: bool) -> Result<Command> {
    match decode_command(line) {
        Err(TelloError::OutOfRange { .. }) if clamp => {
            // Re-read the numeric token and pull it into range
            let mut tokens = line.split_whitespace();
            let verb = tokens.next().unwrap_or_default();
            let value = tokens.next().unwrap_or_default();
            let command = match verb {
                "cw" | "ccw" => Command::Rotate {
                    direction: verb.parse()?,
                    degrees: number(ANGLE_RANGE, value, true, DEFAULT_ANGLE_DEGREES)?,
                },
                "speed" => Command::Speed {
                    speed: number(SPEED_RANGE, value, true, SPEED_RANGE.min)?,
                },
                _ => Command::Move {
                    direction: verb.parse()?,
                    cm: number(DISTANCE_RANGE, value, true, DEFAULT_DISTANCE_CM)?,
                },
            };
            Ok(command)
        }
        other => other,
    }
}
