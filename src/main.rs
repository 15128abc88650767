use std::io::{self, BufWriter, Write};

use anyhow::Context;
use log::info;
use wage_dash::{ConsolePresenter, Dashboard, DashboardConfig, load_datasets};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::default();
    let tables = load_datasets(&config).context("failed to load wage data")?;
    let mut dashboard =
        Dashboard::new(tables, &config).context("failed to derive dashboard views")?;

    let stdout = io::stdout();
    let mut presenter = ConsolePresenter::new(BufWriter::new(stdout.lock()));
    dashboard
        .render(&mut presenter)
        .context("failed to render dashboard")?;
    presenter.into_inner().flush()?;

    info!(
        "Rendered dashboard for {}",
        dashboard.selection().selected_prefecture
    );
    Ok(())
}
