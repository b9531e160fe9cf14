use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::{output::write_json, provider_args::ProviderArgs};

#[derive(Args)]
pub struct MatrixArgs {
    #[command(flatten)]
    provider: ProviderArgs,

    /// Output JSON file, unreachable pairs and the diagonal are `null`
    #[arg(short, long)]
    out: PathBuf,
}

pub fn run(args: MatrixArgs) -> Result<(), anyhow::Error> {
    let locations = args.provider.load_locations()?;
    let provider = args.provider.build_provider(&locations)?;
    let matrix = args.provider.build_matrix(&locations, &provider)?;

    write_json(&matrix, &args.out)?;
    info!(
        locations = matrix.num_locations(),
        "Distance matrix of {} written to {}",
        args.provider.input.display(),
        args.out.display()
    );

    Ok(())
}
