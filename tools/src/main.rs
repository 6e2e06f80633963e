//! report-runner: headless report generator for the usage dashboard.
//!
//! Usage:
//!   report-runner --window 30
//!   report-runner --window 14 --bucket "$20–40" --user mary.chen2@example.com
//!   report-runner --config catalog.json --json

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::env;
use usageboard_core::{
    config::DashboardConfig,
    detail::{generate_user_stats, UserDetailStats},
    distribution::SpendBucketDatum,
    pool::{compute_pool_metrics, mock_usage_stats, PoolMetrics, UsageStats},
    roster::{generate_bucket_roster, SyntheticUser},
    series::UsagePoint,
    source::{MockDataSource, SpendDataSource},
};

#[derive(serde::Serialize)]
struct Drilldown {
    bucket: String,
    roster: Vec<SyntheticUser>,
    user: Option<String>,
    user_detail: Option<UserDetailStats>,
}

#[derive(serde::Serialize)]
struct UsageReport {
    generated_at: DateTime<Utc>,
    window_days: u32,
    distribution_window_days: u32,
    series: Vec<UsagePoint>,
    distribution: Vec<SpendBucketDatum>,
    pool: UsageStats,
    metrics: PoolMetrics,
    drilldown: Option<Drilldown>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let window: u32 = parse_arg(&args, "--window", 30);
    let json = args.iter().any(|a| a == "--json");
    let bucket_label = str_arg(&args, "--bucket");
    let user_email = str_arg(&args, "--user");

    let config = match str_arg(&args, "--config") {
        Some(path) => DashboardConfig::load(&path)?,
        None => DashboardConfig::default(),
    };

    // The distribution picker tops out at 30 days.
    let distribution_window = window.min(30);

    let source = MockDataSource::new(config.clone());
    let series = source.usage_series(window).await?;
    let distribution = source.spend_distribution(distribution_window).await?;

    let now = Utc::now();
    let pool = mock_usage_stats(&config.pool, now);
    let metrics = compute_pool_metrics(&pool, now);

    let drilldown = bucket_label.map(|label| {
        let datum = distribution
            .iter()
            .find(|b| b.bucket == label)
            .cloned()
            .unwrap_or(SpendBucketDatum {
                bucket: label.clone(),
                users: 0,
            });
        let roster = generate_bucket_roster(&datum);
        let row = user_email
            .as_deref()
            .and_then(|email| roster.iter().find(|u| u.email == email));
        let user_detail =
            row.map(|u| generate_user_stats(&config, &u.email, u.spend, &label));
        Drilldown {
            bucket: label,
            roster,
            user: user_email.clone(),
            user_detail,
        }
    });

    log::info!(
        "report built: window={window} series_points={} buckets={}",
        series.len(),
        distribution.len()
    );

    let report = UsageReport {
        generated_at: now,
        window_days: window,
        distribution_window_days: distribution_window,
        series,
        distribution,
        pool,
        metrics,
        drilldown,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}

fn print_summary(report: &UsageReport) {
    println!("usageboard — usage report");
    println!("  window:       {} days", report.window_days);
    println!();

    if let (Some(first), Some(last)) = (report.series.first(), report.series.last()) {
        let total: f64 = report.series.iter().map(|p| p.total).sum();
        let peak = report
            .series
            .iter()
            .max_by(|a, b| a.total.total_cmp(&b.total));
        println!("  usage {} → {}", first.date, last.date);
        println!("    total spend:  ${total:.2}");
        if let Some(peak) = peak {
            println!("    peak day:     {} (${:.2})", peak.date, peak.total);
        }
    }
    println!();

    let population: u64 = report.distribution.iter().map(|b| u64::from(b.users)).sum();
    println!(
        "  distribution ({} days): {} simulated users",
        report.distribution_window_days, population
    );
    for datum in report.distribution.iter().take(5) {
        println!("    {:>10}  {:>5} users", datum.bucket, datum.users);
    }
    println!("    ...");
    println!();

    println!("  pool");
    println!(
        "    remaining:    ${:.2} of ${:.2} ({}%)",
        report.pool.remaining_pool, report.pool.total_pool, report.metrics.remaining_percent
    );
    println!("    renewal in:   {} days", report.metrics.days_until_renewal);
    match report.metrics.days_until_run_out {
        Some(days) => println!("    run-out in:   {days} days"),
        None => println!("    run-out:      never (no burn)"),
    }
    println!(
        "    overage:      ${:.2}",
        report.metrics.projected_overage_spend
    );
    println!(
        "    next true-up: {}",
        report.metrics.next_true_up.format("%Y-%m-%d")
    );
    println!(
        "    seats to add: {}",
        report.metrics.projected_seats_added
    );

    if let Some(drill) = &report.drilldown {
        println!();
        println!("  drill-down {}", drill.bucket);
        for user in drill.roster.iter().take(10) {
            println!("    {:<40} ${:>8.2}", user.email, user.spend);
        }
        if let Some(detail) = &drill.user_detail {
            println!();
            println!("    {} detail:", drill.user.as_deref().unwrap_or("user"));
            println!("      agent requests:  {}", detail.agent_requests);
            println!(
                "      lines:           {} generated / {} accepted",
                detail.lines_generated, detail.lines_accepted
            );
            println!(
                "      tab completions: {}",
                detail.tab_completions_accepted
            );
            for usage in &detail.model_usage {
                println!("      {:<14} {:>3}%", usage.model, usage.percent);
            }
        }
    }
}
