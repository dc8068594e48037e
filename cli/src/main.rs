//! taumap CLI — driving adapter for the tau association producer.
//!
//! Subcommands:
//! - `produce <config> <events> [--trace]` — run the producer over an event file
//! - `check <config>` — validate config loads without errors
//! - `describe` — print accepted config parameters

use std::process;

use taumap::{Association, Event, MatchTrace, ProducerConfig, TauMapProducer, TauMatchMaps};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "produce" => cmd_produce(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "describe" => cmd_describe(),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_produce(args: &[String]) -> Result<(), String> {
    let opts = parse_produce_args(args)?;

    let config = ProducerConfig::load(&opts.config_path).map_err(|e| e.to_string())?;
    let events = Event::load_all(&opts.events_path).map_err(|e| e.to_string())?;
    let producer = TauMapProducer::new(config);

    tracing::info!(events = events.len(), path = %opts.events_path, "processing events");

    for event in &events {
        let maps = producer.produce(event).map_err(|e| {
            format!(
                "run {} lumi {} event {}: {e}",
                event.id.run, event.id.lumi, event.id.event
            )
        })?;
        let trace = if opts.trace {
            Some(producer.produce_with_trace(event).map_err(|e| e.to_string())?)
        } else {
            None
        };
        println!("{}", render_event(event, &maps, trace.as_ref()));
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let Some(config_path) = args.first() else {
        return Err("check requires a config file path".into());
    };

    let config = ProducerConfig::load(config_path).map_err(|e| format!("config invalid: {e}"))?;

    println!(
        "Config valid: packedPFCandidates={} patTaus={}",
        config.packed_pf_candidates, config.pat_taus
    );
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Uniform return type for all commands
fn cmd_describe() -> Result<(), String> {
    println!("Parameters:");
    for param in ProducerConfig::describe() {
        println!("  {param}");
    }

    println!("\nProduces:");
    for kind in Association::ALL {
        println!("  {}", kind.label());
    }

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════════

fn render_event(event: &Event, maps: &TauMatchMaps, trace: Option<&MatchTrace>) -> String {
    let mut out = serde_json::Map::new();
    out.insert("run".into(), event.id.run.into());
    out.insert("lumi".into(), event.id.lumi.into());
    out.insert("event".into(), event.id.event.into());
    for (label, map) in maps.iter() {
        out.insert(label.into(), map.as_slice().into());
    }
    if let Some(trace) = trace {
        let discarded: serde_json::Map<String, serde_json::Value> = Association::ALL
            .into_iter()
            .map(|kind| {
                let n = trace.discarded().filter(|(_, hit)| hit.kind == kind).count();
                (kind.label().to_owned(), n.into())
            })
            .collect();
        out.insert("discarded".into(), discarded.into());
    }
    serde_json::Value::Object(out).to_string()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, PartialEq, Eq)]
struct ProduceArgs {
    config_path: String,
    events_path: String,
    trace: bool,
}

fn parse_produce_args(args: &[String]) -> Result<ProduceArgs, String> {
    let mut positional = Vec::new();
    let mut trace = false;

    for arg in args {
        match arg.as_str() {
            "--trace" => trace = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unexpected argument \"{flag}\""));
            }
            path => positional.push(path.to_owned()),
        }
    }

    match <[String; 2]>::try_from(positional) {
        Ok([config_path, events_path]) => Ok(ProduceArgs {
            config_path,
            events_path,
            trace,
        }),
        Err(_) => Err("produce requires a config file path and an events file path".into()),
    }
}

fn print_usage() {
    eprintln!(
        "Usage: taumap <command> [options]

Commands:
  produce <config> <events> [--trace]   Produce tau maps for every event
  check <config>                        Validate config
  describe                              Print accepted config parameters
  help                                  Show this help

Set RUST_LOG=debug for per-event summaries."
    );
}
