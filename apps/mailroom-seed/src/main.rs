use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = mailroom_seed::Args::parse();

	mailroom_seed::run(args).await
}
