use anyhow::Context;
use clap::Parser;
use generator::profile::{write_strain_file, GeneratorConfig};
use serde_json::json;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::report::format_report;
use workflow::runner::Runner;

mod generator;
mod io;
mod workflow;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Cumulative phase, amplitude and omega from complex strain data"
)]
struct Args {
    /// Strain file with `time real imag` columns (.asc or .txt)
    input: Option<PathBuf>,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 100.0)]
    window_start: f64,
    #[arg(long, default_value_t = 300.0)]
    window_end: f64,
    #[arg(long, default_value_t = 15)]
    precision: usize,
    /// Write a synthetic chirp to this path and process it
    #[arg(long, conflicts_with = "input")]
    synthetic: Option<PathBuf>,
    /// Noise level for the synthetic chirp
    #[arg(long, default_value_t = 0.0, requires = "synthetic")]
    noise: f64,
    /// Print the fit summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        let config = WorkflowConfig::from_args(args.window_start, args.window_end, args.precision);
        config.validate()?;
        config
    };

    let input = match (args.input, args.synthetic) {
        (Some(path), _) => path,
        (None, Some(path)) => {
            let generator = GeneratorConfig {
                noise: args.noise,
                ..Default::default()
            };
            write_strain_file(&path, &generator).context("generating synthetic strain")?;
            path
        }
        (None, None) => anyhow::bail!("provide an input strain file or --synthetic <PATH>"),
    };

    let runner = Runner::new(workflow_config);
    let result = runner.execute(&input)?;

    if args.json {
        let summary = json!({
            "input": input.display().to_string(),
            "output": result.output_path.display().to_string(),
            "samples": result.products.len(),
            "fit": result.report,
            "metrics": runner.metrics(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", format_report(&result.report));
        println!(
            "Processed data has been saved to {}",
            result.output_path.display()
        );
    }

    log::debug!("pipeline metrics {:?}", runner.metrics());
    Ok(())
}
