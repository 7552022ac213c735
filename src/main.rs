//! Sentinel simulator CLI
//!
//! Usage:
//!   sentinel --demo                  # Scripted escalation arc
//!   sentinel --interactive           # Virtual-clock REPL
//!   sentinel --demo --json           # JSON transition records
//!
//! The binary plays the hosting platform: it owns a simulated board (tilt
//! switch, button, potentiometer, lamps, buzzer), samples it into TickInputs,
//! and applies the actions the core hands back. Time is virtual, so every
//! session is reproducible for a given seed.

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use sentinel::core::SentinelEngine;
use sentinel::types::{Action, SentinelState, TickEffects, TickInputs};
use sentinel::{ANALOG_MAX, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "sentinel",
    version = VERSION,
    about = "Tilt sentinel simulator - poke the device, watch it escalate",
    long_about = "Drives the sentinel core against a simulated board.\n\n\
                  Modes:\n  \
                  --demo         Scripted escalation arc (tilt -> lockout -> mercy -> reward)\n  \
                  --interactive  Virtual-clock REPL (tilt / tap / hold / pot / wait)\n\n\
                  States:\n  \
                  IDLE      At rest, watching\n  \
                  ALERT     Disturbed once\n  \
                  ANGRY     Escalating, blink/beep pattern active\n  \
                  COOLDOWN  Coming down\n  \
                  REWARD    Earned by patience\n  \
                  LOCKED    Hard lockout, hold the button 2s to reset"
)]
struct Args {
    /// Run the scripted demo scenario
    #[arg(short, long)]
    demo: bool,

    /// Interactive virtual-clock REPL
    #[arg(short, long)]
    interactive: bool,

    /// Output transition records as JSON lines
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show every lamp and tone command, not just transitions
    #[arg(long)]
    verbose: bool,

    /// RNG seed (default: system-time noise, standing in for analog noise)
    #[arg(long)]
    seed: Option<u32>,

    /// Virtual milliseconds per engine tick
    #[arg(long, default_value_t = 1)]
    tick_ms: u64,
}

fn main() {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(noise_seed);

    if args.demo {
        run_demo(seed, &args);
    } else if args.interactive {
        run_interactive(seed, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(seed, &args);
    }
}

/// Ambient seed for hosts without an analog noise pin
fn noise_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos()
}

// =============================================================================
// SIMULATED BOARD + DRIVER LOOP
// =============================================================================

/// Raw line levels of the simulated board. Both digital lines idle high
/// (tilt contact closed at rest, button on a pull-up).
struct SimBoard {
    tilt_level: bool,
    button_level: bool,
    pot_raw: u16,
}

impl SimBoard {
    fn new() -> Self {
        Self {
            tilt_level: true,
            button_level: true,
            pot_raw: ANALOG_MAX / 2,
        }
    }

    fn sample(&self) -> TickInputs {
        TickInputs {
            tilt_level: self.tilt_level,
            button_level: self.button_level,
            patience_raw: self.pot_raw,
        }
    }
}

/// The driver loop: owns the engine, the board, and the virtual clock
struct Sim {
    engine: SentinelEngine,
    board: SimBoard,
    now_ms: u64,
    tick_ms: u64,
    json: bool,
    no_color: bool,
    verbose: bool,
}

impl Sim {
    fn new(seed: u32, args: &Args) -> Self {
        let mut sim = Self {
            engine: SentinelEngine::new(seed, 0),
            board: SimBoard::new(),
            now_ms: 0,
            tick_ms: args.tick_ms.max(1),
            json: args.json,
            no_color: args.no_color,
            verbose: args.verbose,
        };
        let fx = sim.engine.start(sim.board.pot_raw);
        sim.apply(fx);
        sim
    }

    /// Advance the virtual clock, ticking the engine as we go
    fn advance(&mut self, ms: u64) {
        let end = self.now_ms + ms;
        while self.now_ms < end {
            self.now_ms = (self.now_ms + self.tick_ms).min(end);
            let fx = self.engine.step(&self.board.sample(), self.now_ms);
            self.apply(fx);
        }
    }

    /// One clean disturbance: long enough for the slowest debounce window
    fn tilt_pulse(&mut self) {
        self.board.tilt_level = false;
        self.advance(20);
        self.board.tilt_level = true;
        self.advance(5);
    }

    /// Short press-and-release
    fn button_tap(&mut self) {
        self.board.button_level = false;
        self.advance(60);
        self.board.button_level = true;
        self.advance(5);
    }

    /// Continuous hold for the unlock gesture
    fn button_hold(&mut self, ms: u64) {
        self.board.button_level = false;
        self.advance(ms);
        self.board.button_level = true;
        self.advance(5);
    }

    /// Apply one tick's actions to the simulated board output
    fn apply(&self, fx: TickEffects) {
        if self.json {
            if let Some(record) = &fx.transition {
                println!("{}", serde_json::to_string(record).unwrap());
            }
            return;
        }

        for action in &fx.actions {
            match action {
                Action::EmitLine(line) => self.print_wire_line(line),
                Action::SetIndicator(p) if self.verbose => {
                    println!(
                        "{}",
                        format!(
                            "  lamps @{}ms: ready={} warning={} alarm={}",
                            self.now_ms, p.ready, p.warning, p.alarm
                        )
                        .dimmed()
                    );
                }
                Action::StartTone { hz, duration_ms } if self.verbose => {
                    println!(
                        "{}",
                        format!("  tone @{}ms: {}Hz for {}ms", self.now_ms, hz, duration_ms)
                            .dimmed()
                    );
                }
                Action::StartContinuousTone { hz } => {
                    println!("{}", format!("  alarm tone on: {}Hz continuous", hz).red());
                }
                Action::StopTone if self.verbose => {
                    println!("{}", format!("  tone @{}ms: off", self.now_ms).dimmed());
                }
                _ => {}
            }
        }
    }

    /// Telemetry lines go out exactly as the wire would carry them,
    /// tinted by the current state for the terminal
    fn print_wire_line(&self, line: &str) {
        if self.no_color {
            println!("{}", line);
        } else {
            println!(
                "{}{}{}",
                self.engine.state().color_code(),
                line,
                SentinelState::color_reset()
            );
        }
    }

    fn prompt(&self) -> String {
        let state = self.engine.state();
        if self.no_color {
            format!("[t={}ms {} anger={}] > ", self.now_ms, state, self.engine.anger())
        } else {
            format!(
                "{}[t={}ms {} anger={}]{} > ",
                state.color_code(),
                self.now_ms,
                state,
                self.engine.anger(),
                SentinelState::color_reset()
            )
        }
    }
}

// =============================================================================
// DEMO MODE
// =============================================================================

/// The full arc: disturbance to lockout, mercy, then a patience run
fn run_demo(seed: u32, args: &Args) {
    print_header("Demo", args);
    let mut sim = Sim::new(seed, args);

    narrate(args, "settling at rest");
    sim.advance(500);

    narrate(args, "one bump");
    sim.tilt_pulse();
    sim.advance(400);

    narrate(args, "bump again while it watches");
    sim.tilt_pulse();
    sim.advance(300);

    narrate(args, "two more bumps, quick");
    sim.tilt_pulse();
    sim.advance(160);
    sim.tilt_pulse();

    narrate(args, "it has had enough");
    sim.advance(1400);

    narrate(args, "sitting locked; tilt does nothing now");
    sim.tilt_pulse();
    sim.advance(500);

    narrate(args, "holding the button for mercy");
    sim.button_hold(2300);

    narrate(args, "patience knob to minimum, then hands off");
    sim.board.pot_raw = 0;
    sim.advance(5200);

    narrate(args, "reward lap runs out on its own");
    sim.advance(8200);

    if !args.json {
        println!();
        println!(
            "Demo complete at t={}ms: state={} anger={}",
            sim.now_ms,
            sim.engine.state(),
            sim.engine.anger()
        );
    }
}

fn narrate(args: &Args, text: &str) {
    if args.json {
        return;
    }
    if args.no_color {
        println!("-- {}", text);
    } else {
        println!("{}", format!("-- {}", text).bold());
    }
}

// =============================================================================
// INTERACTIVE MODE
// =============================================================================

/// Virtual-clock REPL: each command moves the board, time only passes on
/// `wait`, so a session is a reproducible script
fn run_interactive(seed: u32, args: &Args) {
    print_header("Interactive", args);
    if !args.json {
        println!("Commands: tilt | tap | hold [ms] | pot <0-{}> | wait <ms> | stat | quit", ANALOG_MAX);
        println!("Time is virtual: nothing moves until you wait.");
        println!();
    }

    let mut sim = Sim::new(seed, args);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", sim.prompt());
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended at t={}ms.", sim.now_ms);
            break;
        }

        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let arg = parts.next().and_then(|a| a.parse::<u64>().ok());

        match cmd {
            "tilt" => sim.tilt_pulse(),
            "tap" => sim.button_tap(),
            "hold" => sim.button_hold(arg.unwrap_or(2300)),
            "pot" => match arg {
                Some(raw) if raw <= ANALOG_MAX as u64 => sim.board.pot_raw = raw as u16,
                _ => println!("pot wants a value in 0..={}", ANALOG_MAX),
            },
            "wait" => match arg {
                Some(ms) => sim.advance(ms),
                None => println!("wait wants a duration in ms"),
            },
            "stat" => {
                println!(
                    "state={} anger={} dwell={}ms pot={}",
                    sim.engine.state(),
                    sim.engine.anger(),
                    sim.engine.dwell_ms(sim.now_ms),
                    sim.board.pot_raw
                );
            }
            _ => println!("unknown command: {}", cmd),
        }
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn print_header(mode: &str, args: &Args) {
    if args.json {
        return;
    }
    let title = format!("Sentinel v{} - {} Mode", VERSION, mode);
    if args.no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "========================================".bold());
        println!("  {}", title.bold());
        println!("{}", "========================================".bold());
    }
    println!();
}
