use clap::Parser;
use quiknepal::core::{forward, Upstream, UpstreamRequest};
use quiknepal::domain::model::{
    CalendarEventsQuery, DateConversionQuery, ForexQuery, MonthCalendarQuery, RashifalQuery,
};
use quiknepal::utils::logger;
use quiknepal::utils::validation::Validate;
use quiknepal::{ConfigOverrides, HttpUpstream, ProxyConfig};
use std::time::Instant;

/// Calls every upstream endpoint once, the way the proxy would, and reports
/// which ones answer.
#[derive(Parser)]
#[command(name = "probe-upstream")]
#[command(about = "Check that every upstream endpoint used by the proxy responds")]
struct Args {
    /// Upstream API base URL (overrides API_BASE_URL)
    #[arg(long)]
    upstream: Option<String>,

    #[arg(long, default_value = "20")]
    timeout_seconds: u64,

    /// BS year used for the calendar probes
    #[arg(long, default_value = "2081")]
    year: String,

    /// BS month number used for the month calendar probe
    #[arg(long, default_value = "1")]
    month: String,

    /// AD date used for the conversion and forex probes
    #[arg(long, default_value = "2024-04-13")]
    date: String,

    #[arg(short, long)]
    verbose: bool,
}

fn sample_requests(args: &Args) -> Vec<UpstreamRequest> {
    vec![
        forward::calendar_events(&CalendarEventsQuery {
            year_bs: Some(args.year.clone()),
            ..Default::default()
        }),
        forward::date_conversion(&DateConversionQuery {
            from: Some("ad".to_string()),
            date: Some(args.date.clone()),
        }),
        forward::month_calendar(&MonthCalendarQuery {
            year: Some(args.year.clone()),
            month: Some(args.month.clone()),
        }),
        forward::vegetables(),
        forward::metals(),
        forward::rashifal(&RashifalQuery::default()),
        forward::forex(&ForexQuery {
            from: Some(args.date.clone()),
            to: Some(args.date.clone()),
            page: Some("1".to_string()),
            per_page: Some("5".to_string()),
        }),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let overrides = ConfigOverrides {
        upstream: args.upstream.clone(),
        timeout_seconds: Some(args.timeout_seconds),
        ..Default::default()
    };
    let config = ProxyConfig::load(None, &overrides)?;
    config.validate()?;

    let upstream = HttpUpstream::new(&config)?;
    println!("🚀 Probing {}", upstream.base_url());

    let mut failures = 0usize;
    for request in sample_requests(&args) {
        let url = upstream.url_for(&request)?;
        let started = Instant::now();

        match upstream.fetch(&request).await {
            Ok(body) => println!(
                "  ✅ {:<16} {} ({} bytes, {:?})",
                request.route.to_string(),
                url,
                body.bytes.len(),
                started.elapsed()
            ),
            Err(e) => {
                failures += 1;
                tracing::debug!("{} failed: {:?}", request.route, e);
                println!(
                    "  ❌ {:<16} {} ({})",
                    request.route.to_string(),
                    url,
                    e.user_friendly_message()
                );
            }
        }
    }

    if failures > 0 {
        eprintln!("❌ {} upstream endpoint(s) failed", failures);
        std::process::exit(2);
    }

    println!("🎉 All upstream endpoints responded");
    Ok(())
}
