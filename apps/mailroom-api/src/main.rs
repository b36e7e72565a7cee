use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = mailroom_api::Args::parse();

	mailroom_api::run(args).await
}
