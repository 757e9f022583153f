//! Interleaving of independent toggles.
//!
//! Builds `T ||| T ||| ... ||| T` for `n` copies of a two-state toggle and
//! reports how the state space grows.
//!
//! Run with:
//! ```bash
//! cargo run --example interleave -- 4
//! ```

use clap::Parser;
use log::info;

use lts_rs::system::TransitionSystem;

#[derive(Debug, Parser)]
#[command(author, version, about = "Interleaving of n toggles")]
struct Cli {
    /// Number of components.
    #[arg(value_name = "INT", default_value = "3")]
    n: usize,

    /// Let all components share one action name.
    #[arg(long)]
    shared: bool,
}

fn toggle(index: usize, shared: bool) -> color_eyre::Result<TransitionSystem> {
    let action = if shared { "t".to_string() } else { format!("t{}", index) };
    let ap = format!("on{}", index);
    let ts = TransitionSystem::new(
        &["off", "on"],
        &[action.as_str()],
        vec![
            ("off", vec![(action.as_str(), vec!["on"])]),
            ("on", vec![(action.as_str(), vec!["off"])]),
        ],
        &["off"],
        &[ap.as_str()],
        vec![("on", vec![ap.as_str()])],
    )?;
    Ok(ts)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let mut product = toggle(0, args.shared)?;
    for i in 1..args.n.max(1) {
        let component = toggle(i, args.shared)?;
        product = product.interleave(&component)?;
        info!(
            "after {} components: {} states, {} actions, {} transitions",
            i + 1,
            product.num_states(),
            product.actions().len(),
            product.num_transitions()
        );
    }

    let reachable = product.reachable_states();
    println!("states:    {}", product.num_states());
    println!("reachable: {}", reachable.len());
    println!("action-deterministic: {}", product.is_action_deterministic());

    if let Some(all_on) = reachable.iter().find(|s| product.label(s).len() == args.n.max(1)) {
        println!("all components on in {}", all_on);
    }

    println!("Total time: {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
