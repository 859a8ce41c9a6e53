use anyhow::Result;
use chrono::Local;
use clap::Parser;
use newscal::{
    calendar::EventPipeline,
    config::CalendarConfig,
    fetch::{HttpPageSource, SnapshotDirSource},
    months::{self, MonthRequest},
    run::run_months,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Scrape a news calendar into one CSV per month")]
struct Args {
    /// Months to scrape: this, next, prev, or e.g. "jan 2007" / "january 2007"
    #[arg(long, num_args = 1.., conflicts_with_all = ["start", "end"])]
    months: Vec<String>,

    /// First month of a range, e.g. "jan 2007"
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// Last month of a range (inclusive), e.g. "jun 2007"
    #[arg(long, requires = "start")]
    end: Option<String>,

    /// Output directory for <MONTH>_<YEAR>_news.csv files
    #[arg(long, default_value = "news")]
    out_dir: PathBuf,

    /// YAML or JSON file overriding the default calendar tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read saved pages (<mon>.<year>.html) from this directory instead of the web
    #[arg(long)]
    snapshots: Option<PathBuf>,
}

impl Args {
    fn month_request(&self) -> MonthRequest {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => MonthRequest::Range {
                start: start.clone(),
                end: end.clone(),
            },
            _ => MonthRequest::List(self.months.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    // ─── 2) resolve months before touching the network ───────────────
    let months = months::resolve(&args.month_request(), Local::now().date_naive())?;
    info!(
        first = %months[0],
        last = %months[months.len() - 1],
        count = months.len(),
        "months to scrape"
    );

    // ─── 3) config + pipeline ────────────────────────────────────────
    let cfg = match &args.config {
        Some(path) => CalendarConfig::load(path)?,
        None => CalendarConfig::default(),
    };
    let pipeline = EventPipeline::new(&cfg)?;

    // ─── 4) scrape month by month with one page source ───────────────
    let summary = match &args.snapshots {
        Some(dir) => {
            let mut source = SnapshotDirSource::new(dir);
            info!(dir = %source.dir().display(), "using saved pages");
            run_months(&mut source, &pipeline, &months, &args.out_dir).await?
        }
        None => {
            let mut source = HttpPageSource::new(&cfg)?;
            run_months(&mut source, &pipeline, &months, &args.out_dir).await?
        }
    };

    for s in &summary {
        println!("{}: {} events -> {}", s.month, s.records, s.path.display());
    }
    Ok(())
}
