use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = orrery_console::Args::parse();
	orrery_console::run(args).await
}
