mod app;
mod cli;
mod terminal;
pub use app::App;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let app = App::new(args)?;
    app.run()?;

    Ok(())
}
