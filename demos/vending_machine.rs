//! Tour of the beverage vending machine.
//!
//! Run with:
//! ```bash
//! cargo run --example vending_machine -- --dot vending.dot
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::info;

use lts_rs::fragment::{is_path, FinitePathFragment, InfinitePathFragment, PathFragment};
use lts_rs::models::beverage_vending_machine;
use lts_rs::proposition::{display_label, AtomicProposition};
use lts_rs::state::{self, State};
use lts_rs::trace::Trace;

#[derive(Debug, Parser)]
#[command(author, version, about = "Beverage vending machine walkthrough")]
struct Cli {
    /// Write the system (and its quotient) in DOT format to this file.
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Log level.
    #[arg(long, default_value = "info")]
    log: simplelog::LevelFilter,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let ts = beverage_vending_machine();
    println!(
        "ts: {} states, {} actions, {} transitions",
        ts.num_states(),
        ts.actions().len(),
        ts.num_transitions()
    );

    for s in ts.states() {
        let post: Vec<String> = ts.post(s).iter().map(|t| t.to_string()).collect();
        let pre: Vec<String> = ts.pre(s).iter().map(|t| t.to_string()).collect();
        println!(
            "- {:<6} L = {:<14} Post = {:?}, Pre = {:?}, reachable = {}",
            s.to_string(),
            display_label(ts.label(s)),
            post,
            pre,
            ts.is_reachable(s)
        );
    }
    println!("action-deterministic: {}", ts.is_action_deterministic());
    println!("AP-deterministic:     {}", ts.is_ap_deterministic());
    println!("non-blocking:         {}", ts.is_non_blocking());

    // Aggregate the two drink states.
    let partition = vec![
        state::from_names(&["pay"]),
        state::from_names(&["select"]),
        state::from_names(&["beer", "soda"]),
    ];
    info!("partition valid: {}", ts.has_state_space_partition(&partition));
    info!(
        "partition observation preserving: {}",
        ts.has_observation_preserving_state_space_partition(&partition)
    );
    let quotient = ts.to_quotient_transition_system_for(&partition)?;
    println!("quotient: {} states, {} transitions", quotient.num_states(), quotient.num_transitions());
    for s in quotient.states() {
        println!("- {} -> {:?}", s, quotient.post(s).iter().map(|t| t.to_string()).collect::<Vec<_>>());
    }

    // One full round of the machine, repeated forever.
    let lasso = InfinitePathFragment::new(
        FinitePathFragment::new(&ts, vec![State::new("pay")]),
        FinitePathFragment::from_names(&ts, &["select", "beer", "pay"]),
    );
    lasso.check()?;
    let trace = lasso.to_trace();
    let first: Vec<String> = trace.iter().take(8).map(|l| display_label(l)).collect();
    println!("path: {}, trace starts with {}", is_path(&lasso), first.join(" "));
    println!(
        "always paid: {}",
        trace.satisfies_invariant(&AtomicProposition::new("paid"))
    );

    if let Some(path) = args.dot {
        let mut dot = ts.to_dot()?;
        dot.push_str(&quotient.to_dot()?);
        std::fs::write(&path, dot)?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
