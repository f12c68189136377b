//! Print the built-in archetype weight tables

use anyhow::Result;
use clap::Parser;
use console::style;

use combat_runtime::{Archetype, Metric, MetricCategory};

/// Print the built-in archetype weight tables
#[derive(Parser)]
pub struct Profiles {
    /// Print as TOML `[weights]` tables ready to paste into a config file
    #[arg(long)]
    toml: bool,
}

impl Profiles {
    pub fn execute(self) -> Result<()> {
        if self.toml {
            for archetype in Archetype::all() {
                println!("# {}", archetype);
                println!("[weights]");
                for metric in Metric::all() {
                    println!("{} = {:.1}", metric, archetype.profile().get(metric));
                }
                println!();
            }
            return Ok(());
        }

        print!("{:<24}", style("metric").bold());
        for archetype in Archetype::all() {
            print!("{:>12}", style(archetype).bold().cyan());
        }
        println!();

        for category in [
            MetricCategory::Damage,
            MetricCategory::Positioning,
            MetricCategory::TargetSelection,
        ] {
            println!("{}", style(category).yellow());
            for metric in category.metrics() {
                print!("  {:<22}", metric);
                for archetype in Archetype::all() {
                    print!("{:>12.1}", archetype.profile().get(metric));
                }
                println!();
            }
        }
        Ok(())
    }
}
