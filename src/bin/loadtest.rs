use aegis_storefront::{config::LoadTestConfig, loadtest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "happy".to_string());
    let profile = loadtest::LoadProfile::by_name(&name)
        .ok_or_else(|| anyhow::anyhow!("unknown profile {name:?}, expected happy or stress"))?;
    let config = LoadTestConfig::from_env();

    let report = loadtest::run(&profile, &config.host).await?;

    println!("profile {} against {}", profile.name, config.host);
    println!(
        "requests {}  failed {}  checks failed {}/{}",
        report.requests, report.failed, report.check_failures, report.checked
    );
    for result in report.evaluate(&profile.thresholds) {
        println!("{result}");
    }

    if !report.passed(&profile.thresholds) {
        anyhow::bail!("thresholds crossed for profile {}", profile.name);
    }
    Ok(())
}
