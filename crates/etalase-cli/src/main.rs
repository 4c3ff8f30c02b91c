use clap::Parser;
use etalase_cli::{CliArgs, EtalaseCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let cli = EtalaseCli::from_args("etalase", &args)?;
    cli.run(args).await?;
    Ok(())
}
