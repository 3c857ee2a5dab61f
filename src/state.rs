use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AnalyticsService, AuthService, BlobStore, BusinessService, CustomerService, LocalBlobStore,
    LogMailer, Mailer, OrderService, PostService, ProductCatalogService, SearchService,
    ShopServiceCatalogService, UserService,
};

/// Everything the request handlers share, wired once at startup with
/// explicit constructor injection.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub auth: Arc<AuthService>,

    pub users: Arc<UserService>,

    pub businesses: Arc<BusinessService>,

    pub customers: Arc<CustomerService>,

    pub orders: Arc<OrderService>,

    pub analytics: Arc<AnalyticsService>,

    pub posts: Arc<PostService>,

    pub products: Arc<ProductCatalogService>,

    pub shop_services: Arc<ShopServiceCatalogService>,

    pub search: Arc<SearchService>,

    pub mailer: Arc<dyn Mailer>,

    pub blob_store: Arc<dyn BlobStore>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer::new(&config.mail));
        let blob_store: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(config.uploads.clone()));

        let auth = Arc::new(AuthService::new(
            store.clone(),
            config.security.clone(),
            mailer.clone(),
        ));
        let users = Arc::new(UserService::new(store.clone(), config.security.clone()));
        let businesses = Arc::new(BusinessService::new(store.clone()));
        let customers = Arc::new(CustomerService::new(store.clone()));
        let orders = Arc::new(OrderService::new(store.clone()));
        let analytics = Arc::new(AnalyticsService::new(store.clone()));
        let posts = Arc::new(PostService::new(store.clone()));
        let products = Arc::new(ProductCatalogService::new(store.clone()));
        let shop_services = Arc::new(ShopServiceCatalogService::new(store.clone()));
        let search = Arc::new(SearchService::new(store.clone(), config.search.clone()));

        Ok(Self {
            config,
            store,
            auth,
            users,
            businesses,
            customers,
            orders,
            analytics,
            posts,
            products,
            shop_services,
            search,
            mailer,
            blob_store,
        })
    }
}
