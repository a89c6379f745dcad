use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::{
    checkout::{CHECKOUT_FAILED, CheckoutStatus},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::{AppState, Session},
};

pub async fn checkout_status(state: &AppState) -> AppResult<ApiResponse<CheckoutStatus>> {
    let mut session = state.session.lock().await;
    session.refresh(Instant::now());
    let meta = Meta::basket(session.basket.count());
    Ok(ApiResponse::success(
        "OK",
        session.checkout.status(),
        Some(meta),
    ))
}

pub async fn submit_checkout(state: &AppState) -> AppResult<ApiResponse<CheckoutStatus>> {
    let request = {
        let mut session = state.session.lock().await;
        session.refresh(Instant::now());
        let Session { basket, checkout } = &mut *session;
        checkout.begin(basket)?
    };

    // Runs detached so a dropped request cannot leave the flow in `Submitting`.
    let api = state.api.clone();
    let shared = state.session.clone();
    let status = tokio::spawn(async move {
        let outcome = api.checkout(&request).await;
        let mut session = shared.lock().await;
        session.checkout.complete(outcome, Instant::now());
        let status = session.checkout.status();
        if matches!(status, CheckoutStatus::Succeeded { .. }) {
            schedule_clear(shared.clone(), session.checkout.clear_delay());
        }
        status
    })
    .await
    .map_err(|err| AppError::Internal(err.into()))?;

    match &status {
        CheckoutStatus::Succeeded { .. } => {}
        CheckoutStatus::Failed { .. } => return Err(AppError::Unavailable(CHECKOUT_FAILED)),
        other => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "unexpected checkout state {other:?}"
            )));
        }
    }

    let meta = Meta::basket(state.session.lock().await.basket.count());
    Ok(ApiResponse::success(
        "Checkout successful",
        status,
        Some(meta),
    ))
}

/// Closes the success window once the delay has elapsed, even if nobody
/// reads the basket in the meantime.
fn schedule_clear(session: Arc<Mutex<Session>>, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut session = session.lock().await;
        if session.refresh(Instant::now()) {
            tracing::info!("basket cleared after checkout");
        }
    });
}
