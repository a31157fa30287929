use clap::Parser;
use quiknepal::core::ConfigProvider;
use quiknepal::utils::error::ErrorSeverity;
use quiknepal::utils::logger;
use quiknepal::{CliArgs, HttpUpstream, ProxyConfig, Route};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting quiknepal proxy");
    tracing::debug!("Resolved config: {:?}", config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be bound");
        display_route_table(&config)?;
        return Ok(());
    }

    if let Err(e) = quiknepal::serve(&config).await {
        tracing::error!(
            "❌ Proxy stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn display_route_table(config: &ProxyConfig) -> anyhow::Result<()> {
    let upstream = HttpUpstream::new(config)?;

    println!("📋 Configuration Summary:");
    println!("  Listen: http://{}", config.bind_address());
    println!("  Base path: {}", config.base_path());
    println!("  Upstream: {}", upstream.base_url());
    match config.request_timeout() {
        Some(timeout) => println!("  Timeout: {:?}", timeout),
        None => println!("  Timeout: none"),
    }
    println!();

    let prefix = config.base_path().trim_end_matches('/');
    println!("📡 Routes:");
    for route in Route::ALL {
        let request = quiknepal::core::UpstreamRequest::new(route);
        let params = route.forwarded_params();
        println!(
            "  GET {}{} -> {} [{}]",
            prefix,
            route.local_path(),
            upstream.url_for(&request)?,
            if params.is_empty() {
                "-".to_string()
            } else {
                params.join(", ")
            }
        );
    }
    println!("  GET /health");

    Ok(())
}
