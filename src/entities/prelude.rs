pub use super::business_clients::Entity as BusinessClients;
pub use super::customers::Entity as Customers;
pub use super::orders::Entity as Orders;
pub use super::posts::Entity as Posts;
pub use super::products::Entity as Products;
pub use super::search_cache::Entity as SearchCache;
pub use super::search_history::Entity as SearchHistory;
pub use super::shop_services::Entity as ShopServices;
pub use super::users::Entity as Users;
