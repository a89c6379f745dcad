pub mod basket_service;
pub mod catalog_service;
pub mod checkout_service;
