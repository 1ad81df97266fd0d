use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = ssd_bot::Args::parse();

	ssd_bot::run(args).await
}
