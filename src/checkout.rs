use std::{
    fmt,
    time::{Duration, Instant},
};

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    basket::Basket,
    dto::checkout::{CheckoutReceipt, CheckoutRequest},
    models::EventId,
};

pub const CHECKOUT_FAILED: &str = "Checkout failed. Please try again.";
pub const DEFAULT_CLEAR_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("basket is empty")]
    EmptyBasket,

    #[error("checkout already in progress")]
    InProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    Idle,
    Submitting {
        submitted: Vec<EventId>,
    },
    Succeeded {
        receipt: CheckoutReceipt,
        submitted: Vec<EventId>,
        clear_at: Instant,
    },
    Failed {
        message: &'static str,
    },
}

/// Serializable snapshot of [`CheckoutState`] for views.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutStatus {
    Idle,
    Submitting,
    Succeeded { transaction_id: String },
    Failed { message: String },
}

/// Checkout state machine. Callers pass in the current time.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    state: CheckoutState,
    clear_delay: Duration,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_DELAY)
    }
}

impl CheckoutFlow {
    pub fn new(clear_delay: Duration) -> Self {
        Self {
            state: CheckoutState::Idle,
            clear_delay,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn clear_delay(&self) -> Duration {
        self.clear_delay
    }

    /// Snapshots the basket into a request and moves to `Submitting`.
    /// A previous failure message is dropped.
    pub fn begin(&mut self, basket: &Basket) -> Result<CheckoutRequest, CheckoutError> {
        match self.state {
            CheckoutState::Submitting { .. } | CheckoutState::Succeeded { .. } => {
                return Err(CheckoutError::InProgress);
            }
            CheckoutState::Idle | CheckoutState::Failed { .. } => {}
        }
        if basket.is_empty() {
            return Err(CheckoutError::EmptyBasket);
        }

        let items = basket.checkout_items();
        self.state = CheckoutState::Submitting {
            submitted: items.iter().map(|item| item.event_id).collect(),
        };
        Ok(CheckoutRequest { items })
    }

    /// Records the outcome of the upstream call. Outcomes arriving outside
    /// `Submitting` are ignored.
    pub fn complete<E: fmt::Display>(
        &mut self,
        outcome: Result<CheckoutReceipt, E>,
        now: Instant,
    ) -> &CheckoutState {
        let submitted = match &mut self.state {
            CheckoutState::Submitting { submitted } => std::mem::take(submitted),
            _ => {
                tracing::warn!("checkout outcome received while not submitting");
                return &self.state;
            }
        };

        self.state = match outcome {
            Ok(receipt) => {
                tracing::info!(
                    transaction_id = %receipt.transaction_id,
                    items = submitted.len(),
                    "checkout succeeded"
                );
                CheckoutState::Succeeded {
                    receipt,
                    submitted,
                    clear_at: now + self.clear_delay,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "checkout failed");
                CheckoutState::Failed {
                    message: CHECKOUT_FAILED,
                }
            }
        };
        &self.state
    }

    /// Ends the success window once `now` reaches it, removing the submitted
    /// rows from `basket`. Returns true when that happened.
    pub fn poll(&mut self, now: Instant, basket: &mut Basket) -> bool {
        let CheckoutState::Succeeded {
            submitted,
            clear_at,
            ..
        } = &self.state
        else {
            return false;
        };
        if now < *clear_at {
            return false;
        }

        basket.retain_except(submitted);
        self.state = CheckoutState::Idle;
        true
    }

    pub fn status(&self) -> CheckoutStatus {
        match &self.state {
            CheckoutState::Idle => CheckoutStatus::Idle,
            CheckoutState::Submitting { .. } => CheckoutStatus::Submitting,
            CheckoutState::Succeeded { receipt, .. } => CheckoutStatus::Succeeded {
                transaction_id: receipt.transaction_id.clone(),
            },
            CheckoutState::Failed { message } => CheckoutStatus::Failed {
                message: (*message).to_string(),
            },
        }
    }
}
