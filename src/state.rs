use std::{sync::Arc, time::{Duration, Instant}};

use tokio::sync::Mutex;

use crate::{basket::Basket, checkout::CheckoutFlow, client::TicketApiClient};

/// The shopper's basket and checkout progress. One per storefront process;
/// a restart starts from an empty basket.
#[derive(Debug, Default)]
pub struct Session {
    pub basket: Basket,
    pub checkout: CheckoutFlow,
}

impl Session {
    pub fn new(clear_delay: Duration) -> Self {
        Self {
            basket: Basket::new(),
            checkout: CheckoutFlow::new(clear_delay),
        }
    }

    /// Closes an elapsed checkout success window.
    pub fn refresh(&mut self, now: Instant) -> bool {
        self.checkout.poll(now, &mut self.basket)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub api: TicketApiClient,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(api: TicketApiClient, clear_delay: Duration) -> Self {
        Self {
            api,
            session: Arc::new(Mutex::new(Session::new(clear_delay))),
        }
    }
}
