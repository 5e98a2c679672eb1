//! Interactive timer loop.
//!
//! One engine, one thread. A single `select!` multiplexes the 1 Hz tick, the
//! autosave cadence, keyboard input and Ctrl-C, so every handler finishes
//! before the next event is looked at. The tick interval only exists while
//! the engine is running; it is dropped as soon as the engine goes idle.

use std::io::Write;
use std::time::Duration;

use clap::Args;
use pomodoro_pro_core::display::{format_clock, format_hours_minutes, progress_percent};
use pomodoro_pro_core::{
    Config, Event, Mode, StatsStore, SystemClock, TimerEngine,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, Interval};

use crate::keys::{Key, HELP};
use crate::sink::TerminalSink;

const TICK: Duration = Duration::from_secs(1);

#[derive(Args)]
pub struct RunArgs {
    /// Interval to load before starting (focus, break, longbreak)
    #[arg(long, value_parser = parse_mode)]
    mode: Option<Mode>,
    /// Start counting down immediately
    #[arg(long)]
    start: bool,
    /// Print events as JSON lines instead of a status display
    #[arg(long)]
    json: bool,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse()
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    config.validate()?;
    let store = StatsStore::new(super::open_backend(), SystemClock);
    let mut engine = TimerEngine::new(config.durations(), store)?;
    if config.notifications.enabled {
        engine.add_sink(Box::new(TerminalSink {
            bell: config.notifications.bell,
        }));
    }

    let output = Output { json: args.json };
    if let Some(mode) = args.mode {
        engine.set_mode(mode);
    }
    output.snapshot(&engine)?;
    if args.start {
        if let Some(event) = engine.start() {
            output.event(&event, &engine)?;
        }
    }

    let autosave = Duration::from_secs(config.storage.autosave_interval_secs);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(event_loop(&mut engine, &output, autosave));
    // A pending stdin read cannot be cancelled; don't wait for it.
    runtime.shutdown_background();
    Ok(result?)
}

async fn event_loop(
    engine: &mut TimerEngine,
    output: &Output,
    autosave_every: Duration,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker: Option<Interval> = None;
    let mut autosave = interval_at(Instant::now() + autosave_every, autosave_every);

    loop {
        sync_ticker(engine, &mut ticker);

        tokio::select! {
            _ = next_tick(&mut ticker) => {
                match engine.tick() {
                    Some(event) => output.event(&event, engine)?,
                    None => output.progress(engine)?,
                }
            }
            _ = autosave.tick() => engine.flush(),
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Key::parse(&line) {
                    Some(Key::Quit) => break,
                    Some(key) => apply(key, engine, output)?,
                    None => eprintln!("unknown command: {} ({HELP})", line.trim()),
                }
            }
            Ok(()) = tokio::signal::ctrl_c() => break,
        }
    }

    engine.flush();
    output.finish()
}

fn apply(key: Key, engine: &mut TimerEngine, output: &Output) -> std::io::Result<()> {
    let event = match key {
        Key::Toggle => engine.toggle_timer(),
        Key::Reset => Some(engine.reset_timer()),
        Key::SetMode(mode) => Some(engine.set_mode(mode)),
        Key::ToggleMode => Some(engine.toggle_mode()),
        Key::Status => Some(engine.snapshot()),
        Key::Help => {
            eprintln!("{HELP}");
            None
        }
        Key::Quit => None,
    };
    match event {
        Some(event) => output.event(&event, engine),
        None => Ok(()),
    }
}

/// Create the tick interval when the engine starts running and drop it when
/// it stops, so an idle engine never sees a tick.
fn sync_ticker(engine: &TimerEngine, ticker: &mut Option<Interval>) {
    match (engine.is_running(), ticker.is_some()) {
        (true, false) => *ticker = Some(interval_at(Instant::now() + TICK, TICK)),
        (false, true) => *ticker = None,
        _ => {}
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Renders either a single-line status display or JSON events.
struct Output {
    json: bool,
}

impl Output {
    fn event(&self, event: &Event, engine: &TimerEngine) -> std::io::Result<()> {
        if self.json {
            return self.json_line(event);
        }
        match event {
            Event::SessionCompleted { next_mode, stats, .. } => {
                println!(
                    "\nNext up: {} ({} done today, {} focused, streak {})",
                    next_mode.label(),
                    stats.completed_sessions,
                    format_hours_minutes(stats.total_time_spent_secs),
                    stats.streak_count,
                );
            }
            Event::StateSnapshot { stats, .. } => {
                println!(
                    "\nSession #{}  completed {}  focus time {}  streak {}",
                    stats.session_count,
                    stats.completed_sessions,
                    format_hours_minutes(stats.total_time_spent_secs),
                    stats.streak_count,
                );
            }
            _ => {}
        }
        self.progress(engine)
    }

    fn snapshot(&self, engine: &TimerEngine) -> std::io::Result<()> {
        if self.json {
            return self.json_line(&engine.snapshot());
        }
        println!("{HELP}");
        self.progress(engine)
    }

    fn progress(&self, engine: &TimerEngine) -> std::io::Result<()> {
        if self.json {
            return Ok(());
        }
        let state = if engine.is_running() { "running" } else { "paused" };
        let mut out = std::io::stdout().lock();
        write!(
            out,
            "\r{}  {:<11}  {:>3}%  {:<7}  session #{}",
            format_clock(engine.remaining_seconds()),
            engine.current_mode().label(),
            progress_percent(engine.progress_fraction()),
            state,
            engine.session_count(),
        )?;
        out.flush()
    }

    fn json_line(&self, event: &Event) -> std::io::Result<()> {
        let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()
    }

    fn finish(&self) -> std::io::Result<()> {
        if !self.json {
            println!();
        }
        Ok(())
    }
}
