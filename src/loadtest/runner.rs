use std::{sync::Arc, time::Duration};

use rand::{SeedableRng, rngs::StdRng};
use reqwest::Client;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use super::{
    profile::LoadProfile,
    report::{LoadReport, Sample},
    scenario::VirtualUser,
};

/// How often the controller re-evaluates the desired VU count.
const CONTROL_TICK: Duration = Duration::from_millis(100);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs `profile` against `base_url` and summarizes every request made.
///
/// VUs are spawned as the ramp climbs and park when it falls; a VU always
/// finishes its current iteration before parking or exiting.
pub async fn run(profile: &LoadProfile, base_url: &str) -> Result<LoadReport, reqwest::Error> {
    let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let profile = Arc::new(profile.clone());
    let base_url = base_url.trim_end_matches('/').to_string();

    let (sample_tx, mut sample_rx) = mpsc::unbounded_channel::<Sample>();
    let (desired_tx, desired_rx) = watch::channel(0_u32);
    let mut vus: Vec<JoinHandle<()>> = Vec::new();

    tracing::info!(
        profile = profile.name,
        peak_vus = profile.peak_target(),
        duration_secs = profile.total_duration().as_secs(),
        host = %base_url,
        "load test started"
    );

    let started = Instant::now();
    let total = profile.total_duration();
    let mut ticker = tokio::time::interval(CONTROL_TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let elapsed = started.elapsed();
        if elapsed >= total {
            break;
        }

        let wanted = profile.target_at(elapsed);
        if *desired_tx.borrow() != wanted {
            tracing::debug!(vus = wanted, elapsed_ms = elapsed.as_millis() as u64, "vu target changed");
            desired_tx.send_replace(wanted);
        }

        while vus.len() < wanted as usize {
            let index = vus.len() as u32;
            let vu = VirtualUser {
                http: http.clone(),
                base_url: base_url.clone(),
                rng: StdRng::from_entropy(),
                samples: sample_tx.clone(),
            };
            vus.push(tokio::spawn(drive(
                index,
                vu,
                profile.clone(),
                desired_rx.clone(),
            )));
        }
    }

    // Dropping the sender wakes parked VUs so they can exit.
    desired_tx.send_replace(0);
    drop(desired_tx);
    drop(sample_tx);
    for vu in vus {
        if let Err(err) = vu.await {
            tracing::warn!(error = %err, "virtual user panicked");
        }
    }

    let mut samples = Vec::new();
    while let Some(sample) = sample_rx.recv().await {
        samples.push(sample);
    }

    let report = LoadReport::from_samples(&samples);
    tracing::info!(
        requests = report.requests,
        p95_ms = report.p95().as_millis() as u64,
        failed_rate = report.failed_rate(),
        "load test finished"
    );
    Ok(report)
}

/// VU `index` is active while the desired count is above it.
async fn drive(
    index: u32,
    mut vu: VirtualUser,
    profile: Arc<LoadProfile>,
    mut desired: watch::Receiver<u32>,
) {
    loop {
        let active = *desired.borrow_and_update() > index;
        if active {
            vu.iterate(&profile).await;
        } else if desired.changed().await.is_err() {
            break;
        }
    }
}
