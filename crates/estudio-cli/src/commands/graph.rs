//! Graph inspection command.
//!
//! Builds the engine on the offline host, binds one element and prints the
//! node inventory, the routing edges and a processing order.

use super::common::{engine_settings, offline_engine};
use clap::Args;
use estudio_core::SignalGraph;

#[derive(Args)]
pub struct GraphArgs {
    /// Sample rate of the offline context
    #[arg(long, default_value = "48000")]
    sample_rate: f32,
}

pub fn run(args: GraphArgs) -> anyhow::Result<()> {
    let engine = offline_engine(args.sample_rate, engine_settings())?;
    let host = engine.host();
    let nodes = engine
        .nodes()
        .ok_or_else(|| anyhow::anyhow!("engine did not initialize"))?;
    let plan = engine
        .routing_plan()
        .ok_or_else(|| anyhow::anyhow!("no source bound"))?;
    plan.validate()?;

    println!("Engine Graph");
    println!("============");
    println!();
    println!("Host:        {}", host.name());
    println!("Sample rate: {} Hz", host.sample_rate());
    println!("Nodes:       {}", nodes.len());
    println!("Edges:       {}", plan.edges().len());
    println!();

    println!("Nodes:");
    for id in nodes.iter() {
        let label = nodes.label(id).unwrap_or_default();
        let kind = host.node_kind(id).map_or("?", |k| k.label());
        println!("  {:<6} {label:<18} {kind}", id.index());
    }
    println!();

    println!("Routing:");
    for line in plan.describe(nodes) {
        println!("  {line}");
    }
    println!();

    println!("Processing order:");
    let order: Vec<String> = plan
        .topological_order()?
        .into_iter()
        .map(|id| {
            if id == plan.source() {
                "source".to_string()
            } else if id == plan.destination() {
                "destination".to_string()
            } else {
                nodes.label(id).unwrap_or_else(|| id.to_string())
            }
        })
        .collect();
    println!("  {}", order.join(" → "));

    Ok(())
}
