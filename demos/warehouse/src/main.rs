//! warehouse: driver for the agv_fleet dispatch engine.
//!
//! Loads the built-in six-node warehouse (or a TOML scenario given on the
//! command line), feeds in a few random transport orders, runs the tick
//! engine and prints the final fleet state.
//!
//! ```text
//! cargo run -p warehouse                                  # built-in scenario
//! cargo run -p warehouse -- demos/warehouse/warehouse.toml 40
//! RUST_LOG=fleet_sim=debug cargo run -p warehouse         # per-tick logging
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_core::Tick;
use fleet_dispatch::FleetStore;
use fleet_graph::{DijkstraRouter, Router};
use fleet_output::{CsvWriter, OutputWriter, SnapshotObserver};
use fleet_sim::{Fleet, RobotPosition, Scenario, TickObserver, TickSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                u64   = 42;
const DEFAULT_TICKS:       u64   = 20;
/// One random order is created every this many ticks.
const ORDER_INTERVAL:      u64   = 4;
const RECENT_EVENT_COUNT:  usize = 8;
const OUTPUT_DIR:          &str  = "output/warehouse";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SnapshotObserver<W>,
    snapshot_rows: usize,
    completed:     usize,
    assigned:      usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SnapshotObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, completed: 0, assigned: 0 }
    }
}

impl<W: OutputWriter> TickObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.completed += summary.completed;
        self.assigned  += summary.assigned;
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, store: &FleetStore, positions: &[RobotPosition]) {
        self.snapshot_rows += positions.len();
        self.inner.on_snapshot(tick, store, positions);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}

// ── Random orders ─────────────────────────────────────────────────────────────

/// Create an order between two distinct random nodes.
///
/// Unreachable pairs are rejected by `create_order`; those are skipped.
fn random_order<R: Router>(fleet: &mut Fleet<R>, rng: &mut SmallRng, seq: u32) {
    let nodes = fleet.graph().nodes().to_vec();
    if nodes.len() < 2 {
        return;
    }
    let source = &nodes[rng.gen_range(0..nodes.len())];
    let mut target = &nodes[rng.gen_range(0..nodes.len())];
    while target == source {
        target = &nodes[rng.gen_range(0..nodes.len())];
    }

    let name = format!("O-{}", 2000 + seq);
    match fleet.create_order(name.as_str(), source.clone(), target.clone()) {
        Ok(order) => {
            info!(order = %order.name, from = %source, to = %target, status = %order.status, "random order");
        }
        Err(e) => warn!(order = %name, error = %e, "skipping random order"),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("fleet_sim=info".parse()?)
                .add_directive("fleet_dispatch=info".parse()?)
                .add_directive("warehouse=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let scenario_path = args.next();
    let ticks: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid tick count {s:?}"))?,
        None => DEFAULT_TICKS,
    };

    // 1. Scenario.
    let scenario = match &scenario_path {
        Some(p) => Scenario::from_file(p).with_context(|| format!("loading scenario {p}"))?,
        None => Scenario::warehouse(),
    };
    if scenario.graph.nodes.is_empty() {
        bail!("scenario has no nodes");
    }

    println!("=== warehouse: agv_fleet dispatch engine ===");
    println!(
        "Scenario: {}  |  Ticks: {ticks}  |  Seed: {SEED}",
        scenario_path.as_deref().unwrap_or("built-in warehouse")
    );

    // 2. Build the fleet.
    let mut fleet = scenario.build(DijkstraRouter)?;
    println!(
        "Graph: {} nodes, {} edges  |  Robots: {}  |  Initial orders: {}",
        fleet.graph().node_count(),
        fleet.graph().edge_count(),
        fleet.robots().len(),
        fleet.orders().len(),
    );
    println!();

    // 3. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SnapshotObserver::new(writer));

    // 4. Run, injecting a random order every ORDER_INTERVAL ticks.
    let mut rng = SmallRng::seed_from_u64(SEED);
    let t0 = Instant::now();
    let mut remaining = ticks;
    let mut seq = 0;
    while remaining > 0 {
        let chunk = remaining.min(ORDER_INTERVAL);
        fleet.run_ticks(chunk, &mut obs);
        remaining -= chunk;
        if remaining > 0 {
            seq += 1;
            random_order(&mut fleet, &mut rng, seq);
        }
    }
    let elapsed = t0.elapsed();

    obs.inner.write_event_log(fleet.event_log())?;
    if let Some(e) = obs.inner.take_error() {
        error!(error = %e, "output error");
    }

    // 5. Summary.
    println!("Ran {ticks} ticks in {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("  assigned on tick  : {}", obs.assigned);
    println!("  completed         : {}", obs.completed);
    println!("  robot_snapshots   : {} rows", obs.snapshot_rows);
    println!("  events            : {}", fleet.event_log().len());
    println!("  output            : {OUTPUT_DIR}/");
    println!();

    // 6. Robots.
    println!("{:<10} {:<10} {:<8} {:<8} {:>8}", "Robot", "Status", "From", "To", "Progress");
    println!("{}", "-".repeat(48));
    for p in fleet.robot_positions() {
        println!(
            "{:<10} {:<10} {:<8} {:<8} {:>8.2}",
            p.robot, p.status, p.from, p.to, p.progress
        );
    }
    println!();

    // 7. Orders.
    println!("{:<10} {:<8} {:<8} {:<12} {:>8}", "Order", "Source", "Target", "Status", "Created");
    println!("{}", "-".repeat(50));
    for o in fleet.orders() {
        println!(
            "{:<10} {:<8} {:<8} {:<12} {:>8}",
            o.name, o.source, o.target, o.status, o.created_tick.0
        );
    }
    println!();

    // 8. Most recent events.
    println!("Last {RECENT_EVENT_COUNT} events:");
    for ev in fleet.events(None, Some(RECENT_EVENT_COUNT))? {
        println!(
            "  {}  {:<16} {}",
            ev.timestamp(),
            ev.kind,
            serde_json::Value::Object(ev.detail.clone())
        );
    }

    Ok(())
}
