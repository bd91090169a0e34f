use crate::core::session::Session;
use crate::domain::model::{
    Blog, BlogPayload, BlogSummary, College, CollegeDetail, CollegePayload, Country,
    CountryPayload, CountrySummary, Customer, InterestForm,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn backend_base_url(&self) -> &str;
    /// `None` 代表不設逾時（目錄抓取本來就沒有逾時）
    fn request_timeout(&self) -> Option<Duration>;
}

/// 公開頁面讀取的 REST 後端
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn fetch_colleges(&self) -> Result<Vec<College>>;
    async fn fetch_college(&self, id: &str) -> Result<CollegeDetail>;
    async fn fetch_countries(&self) -> Result<Vec<CountrySummary>>;
    async fn fetch_country(&self, id: &str) -> Result<Country>;
    async fn fetch_blogs(&self) -> Result<Vec<BlogSummary>>;
    async fn fetch_blog(&self, id: &str) -> Result<Blog>;
    async fn submit_interest(&self, form: &InterestForm) -> Result<()>;
}

/// 後台 CRUD；每個呼叫都要帶著 session
#[async_trait]
pub trait AdminBackend: Send + Sync {
    async fn list_customers(&self, session: &Session) -> Result<Vec<Customer>>;
    async fn update_college(
        &self,
        session: &Session,
        id: &str,
        payload: &CollegePayload,
    ) -> Result<()>;
    async fn delete_college(&self, session: &Session, id: &str) -> Result<()>;
    async fn update_country(
        &self,
        session: &Session,
        id: &str,
        payload: &CountryPayload,
    ) -> Result<()>;
    async fn delete_country(&self, session: &Session, id: &str) -> Result<()>;
    async fn create_blog(&self, session: &Session, payload: &BlogPayload) -> Result<()>;
    async fn fetch_admin_blog(&self, session: &Session, id: &str) -> Result<Blog>;
    async fn update_blog(&self, session: &Session, id: &str, payload: &BlogPayload)
        -> Result<()>;
    async fn delete_blog(&self, session: &Session, id: &str) -> Result<()>;
}

#[async_trait]
impl<T: CatalogBackend + ?Sized> CatalogBackend for Arc<T> {
    async fn fetch_colleges(&self) -> Result<Vec<College>> {
        (**self).fetch_colleges().await
    }

    async fn fetch_college(&self, id: &str) -> Result<CollegeDetail> {
        (**self).fetch_college(id).await
    }

    async fn fetch_countries(&self) -> Result<Vec<CountrySummary>> {
        (**self).fetch_countries().await
    }

    async fn fetch_country(&self, id: &str) -> Result<Country> {
        (**self).fetch_country(id).await
    }

    async fn fetch_blogs(&self) -> Result<Vec<BlogSummary>> {
        (**self).fetch_blogs().await
    }

    async fn fetch_blog(&self, id: &str) -> Result<Blog> {
        (**self).fetch_blog(id).await
    }

    async fn submit_interest(&self, form: &InterestForm) -> Result<()> {
        (**self).submit_interest(form).await
    }
}
