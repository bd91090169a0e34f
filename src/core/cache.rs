use crate::domain::model::{
    Blog, BlogSummary, College, CollegeDetail, Country, CountrySummary, InterestForm,
};
use crate::domain::ports::CatalogBackend;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Colleges,
    Countries,
    Blogs,
}

impl CacheKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::Colleges => "colleges",
            CacheKey::Countries => "countries",
            CacheKey::Blogs => "blogs",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 何時重新抓取
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefetchPolicy {
    /// 整個工作階段只抓一次，除非明確 invalidate
    Session,
    /// 超過存活時間就重抓
    Ttl(Duration),
}

impl Default for RefetchPolicy {
    fn default() -> Self {
        RefetchPolicy::Session
    }
}

#[derive(Debug, Clone)]
enum CachedValue {
    Colleges(Vec<College>),
    Countries(Vec<CountrySummary>),
    Blogs(Vec<BlogSummary>),
}

impl CachedValue {
    fn colleges(&self) -> Option<&Vec<College>> {
        match self {
            CachedValue::Colleges(items) => Some(items),
            _ => None,
        }
    }

    fn countries(&self) -> Option<&Vec<CountrySummary>> {
        match self {
            CachedValue::Countries(items) => Some(items),
            _ => None,
        }
    }

    fn blogs(&self) -> Option<&Vec<BlogSummary>> {
        match self {
            CachedValue::Blogs(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Entry {
    value: CachedValue,
    fetched_at: Instant,
}

/// 列表資源共用的快取層，包在任何 `CatalogBackend` 外面。
/// 單筆查詢與送出表單直接穿透
pub struct CachedCatalog<B> {
    inner: B,
    policy: RefetchPolicy,
    entries: Mutex<HashMap<CacheKey, Entry>>,
}

impl<B: CatalogBackend> CachedCatalog<B> {
    pub fn new(inner: B, policy: RefetchPolicy) -> Self {
        Self {
            inner,
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> RefetchPolicy {
        self.policy
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub async fn invalidate(&self, key: CacheKey) {
        if self.entries.lock().await.remove(&key).is_some() {
            tracing::debug!("Cache entry '{}' invalidated", key);
        }
    }

    pub async fn invalidate_all(&self) {
        self.entries.lock().await.clear();
        tracing::debug!("All cache entries invalidated");
    }

    pub async fn is_fresh(&self, key: CacheKey) -> bool {
        let entries = self.entries.lock().await;
        entries.get(&key).map(|e| self.fresh(e)).unwrap_or(false)
    }

    fn fresh(&self, entry: &Entry) -> bool {
        match self.policy {
            RefetchPolicy::Session => true,
            RefetchPolicy::Ttl(ttl) => entry.fetched_at.elapsed() < ttl,
        }
    }

    /// 持鎖期間完成抓取，同一時間只會有一個請求；失敗不寫入快取
    async fn get_or_fetch<T, Fut>(
        &self,
        key: CacheKey,
        fetch: Fut,
        project: fn(&CachedValue) -> Option<&Vec<T>>,
        wrap: fn(Vec<T>) -> CachedValue,
    ) -> Result<Vec<T>>
    where
        T: Clone + Send,
        Fut: Future<Output = Result<Vec<T>>> + Send,
    {
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get(&key) {
            if self.fresh(entry) {
                if let Some(items) = project(&entry.value) {
                    tracing::debug!("Cache hit for '{}' ({} items)", key, items.len());
                    return Ok(items.clone());
                }
            }
        }

        tracing::debug!("Cache miss for '{}', fetching", key);
        let items = fetch.await?;
        entries.insert(
            key,
            Entry {
                value: wrap(items.clone()),
                fetched_at: Instant::now(),
            },
        );
        Ok(items)
    }
}

#[async_trait]
impl<B: CatalogBackend> CatalogBackend for CachedCatalog<B> {
    async fn fetch_colleges(&self) -> Result<Vec<College>> {
        self.get_or_fetch(
            CacheKey::Colleges,
            self.inner.fetch_colleges(),
            CachedValue::colleges,
            CachedValue::Colleges,
        )
        .await
    }

    async fn fetch_college(&self, id: &str) -> Result<CollegeDetail> {
        self.inner.fetch_college(id).await
    }

    async fn fetch_countries(&self) -> Result<Vec<CountrySummary>> {
        self.get_or_fetch(
            CacheKey::Countries,
            self.inner.fetch_countries(),
            CachedValue::countries,
            CachedValue::Countries,
        )
        .await
    }

    async fn fetch_country(&self, id: &str) -> Result<Country> {
        self.inner.fetch_country(id).await
    }

    async fn fetch_blogs(&self) -> Result<Vec<BlogSummary>> {
        self.get_or_fetch(
            CacheKey::Blogs,
            self.inner.fetch_blogs(),
            CachedValue::blogs,
            CachedValue::Blogs,
        )
        .await
    }

    async fn fetch_blog(&self, id: &str) -> Result<Blog> {
        self.inner.fetch_blog(id).await
    }

    async fn submit_interest(&self, form: &InterestForm) -> Result<()> {
        self.inner.submit_interest(form).await
    }
}
