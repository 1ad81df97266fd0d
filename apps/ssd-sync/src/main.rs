use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = ssd_sync::Args::parse();

	ssd_sync::run(args).await
}
