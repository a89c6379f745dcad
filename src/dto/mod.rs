pub mod basket;
pub mod catalog;
pub mod checkout;
