pub mod prelude;

pub mod business_clients;
pub mod customers;
pub mod orders;
pub mod posts;
pub mod products;
pub mod search_cache;
pub mod search_history;
pub mod shop_services;
pub mod users;
