use crate::core::session::Session;
use crate::domain::model::{
    Blog, BlogPayload, BlogSummary, College, CollegeDetail, CollegePayload, Country,
    CountryPayload, CountrySummary, Customer, InterestForm,
};
use crate::domain::ports::{AdminBackend, CatalogBackend, ConfigProvider};
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct CollegesEnvelope {
    colleges: Option<Vec<College>>,
}

#[derive(Debug, Deserialize)]
struct CollegeEnvelope {
    college: Option<CollegeDetail>,
}

#[derive(Debug, Deserialize)]
struct CountriesEnvelope {
    countries: Option<Vec<CountrySummary>>,
}

#[derive(Debug, Deserialize)]
struct CountryEnvelope {
    country: Option<Country>,
}

#[derive(Debug, Deserialize)]
struct BlogsEnvelope {
    blogs: Option<Vec<BlogSummary>>,
}

#[derive(Debug, Deserialize)]
struct BlogEnvelope {
    blog: Option<Blog>,
}

#[derive(Debug, Deserialize)]
struct CustomersEnvelope {
    customers: Option<Vec<Customer>>,
}

/// 後端錯誤回應 `{ "message": "..." }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// 透過 REST 後端實作公開目錄與後台兩個 port
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    client: Client,
}

impl HttpBackend {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let base_url = Url::parse(config.backend_base_url())?;
        if base_url.cannot_be_a_base() {
            return Err(PortalError::InvalidConfigValueError {
                field: "backend.base_url".to_string(),
                value: config.backend_base_url().to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // new() 已排除 cannot-be-a-base，這裡一定拿得到 path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder, label: &str) -> Result<Response> {
        let response = request.send().await?;
        tracing::debug!("📡 {}: response status {}", label, response.status());
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        label: &str,
        resource: &str,
        fallback: &str,
    ) -> Result<T> {
        let response = self.send(request, label).await?;
        if response.status().is_success() {
            return Ok(response.json::<T>().await?);
        }
        Err(status_error(response, resource, fallback).await)
    }

    async fn expect_success(
        &self,
        request: RequestBuilder,
        label: &str,
        resource: &str,
        fallback: &str,
    ) -> Result<()> {
        let response = self.send(request, label).await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(status_error(response, resource, fallback).await)
    }

    fn admin(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.bearer_auth(session.token())
    }
}

/// 把非 2xx 回應轉成對應的錯誤；後端有給 message 就沿用
async fn status_error(response: Response, resource: &str, fallback: &str) -> PortalError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty());

    match status {
        StatusCode::NOT_FOUND => PortalError::NotFound {
            resource: resource.to_string(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortalError::Unauthorized {
            message: message.unwrap_or_else(|| status.to_string()),
        },
        _ => PortalError::BackendError {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| fallback.to_string()),
        },
    }
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    async fn fetch_colleges(&self) -> Result<Vec<College>> {
        let url = self.endpoint(&["colleges"]);
        tracing::debug!("📡 GET {}", url);
        let envelope: CollegesEnvelope = self
            .read_json(self.client.get(url), "colleges", "Colleges", "Failed to load colleges")
            .await?;
        Ok(envelope.colleges.unwrap_or_default())
    }

    async fn fetch_college(&self, id: &str) -> Result<CollegeDetail> {
        let url = self.endpoint(&["colleges", id]);
        tracing::debug!("📡 GET {}", url);
        let resource = format!("College '{}'", id);
        let envelope: CollegeEnvelope = self
            .read_json(self.client.get(url), "college", &resource, "Failed to load college")
            .await?;
        envelope.college.ok_or(PortalError::NotFound { resource })
    }

    async fn fetch_countries(&self) -> Result<Vec<CountrySummary>> {
        let url = self.endpoint(&["countries"]);
        tracing::debug!("📡 GET {}", url);
        let envelope: CountriesEnvelope = self
            .read_json(
                self.client.get(url),
                "countries",
                "Countries",
                "Failed to load countries",
            )
            .await?;
        Ok(envelope.countries.unwrap_or_default())
    }

    async fn fetch_country(&self, id: &str) -> Result<Country> {
        let url = self.endpoint(&["countries", id]);
        tracing::debug!("📡 GET {}", url);
        let resource = format!("Country '{}'", id);
        let envelope: CountryEnvelope = self
            .read_json(self.client.get(url), "country", &resource, "Failed to load country")
            .await?;

        let mut country = envelope.country.ok_or(PortalError::NotFound { resource })?;
        // 單筆回應不一定帶 id
        if country.id.is_empty() {
            country.id = id.to_string();
        }
        Ok(country)
    }

    async fn fetch_blogs(&self) -> Result<Vec<BlogSummary>> {
        let url = self.endpoint(&["blogs"]);
        tracing::debug!("📡 GET {}", url);
        let envelope: BlogsEnvelope = self
            .read_json(self.client.get(url), "blogs", "Blogs", "Failed to load blogs")
            .await?;
        Ok(envelope.blogs.unwrap_or_default())
    }

    async fn fetch_blog(&self, id: &str) -> Result<Blog> {
        let url = self.endpoint(&["blogs", id]);
        tracing::debug!("📡 GET {}", url);
        let resource = format!("Blog '{}'", id);
        let envelope: BlogEnvelope = self
            .read_json(self.client.get(url), "blog", &resource, "Failed to load blog")
            .await?;
        envelope.blog.ok_or(PortalError::NotFound { resource })
    }

    async fn submit_interest(&self, form: &InterestForm) -> Result<()> {
        form.validate()?;

        let url = self.endpoint(&["customers"]);
        tracing::debug!("📡 POST {}", url);
        self.expect_success(
            self.client.post(url).json(form),
            "interest",
            "Customers endpoint",
            "Failed to submit interest form",
        )
        .await?;

        tracing::info!("📨 Interest form submitted for {}", form.name);
        Ok(())
    }
}

#[async_trait]
impl AdminBackend for HttpBackend {
    async fn list_customers(&self, session: &Session) -> Result<Vec<Customer>> {
        let url = self.endpoint(&["admin", "customers"]);
        tracing::debug!("📡 GET {}", url);
        let envelope: CustomersEnvelope = self
            .read_json(
                self.admin(self.client.get(url), session),
                "admin customers",
                "Customers",
                "Failed to load customers",
            )
            .await?;
        Ok(envelope.customers.unwrap_or_default())
    }

    async fn update_college(
        &self,
        session: &Session,
        id: &str,
        payload: &CollegePayload,
    ) -> Result<()> {
        payload.validate()?;
        let url = self.endpoint(&["admin", "colleges", id]);
        tracing::debug!("📡 PUT {}", url);
        self.expect_success(
            self.admin(self.client.put(url).json(payload), session),
            "update college",
            &format!("College '{}'", id),
            "Failed to update college",
        )
        .await
    }

    async fn delete_college(&self, session: &Session, id: &str) -> Result<()> {
        let url = self.endpoint(&["admin", "colleges", id]);
        tracing::debug!("📡 DELETE {}", url);
        self.expect_success(
            self.admin(self.client.delete(url), session),
            "delete college",
            &format!("College '{}'", id),
            "Failed to delete college",
        )
        .await
    }

    async fn update_country(
        &self,
        session: &Session,
        id: &str,
        payload: &CountryPayload,
    ) -> Result<()> {
        payload.validate()?;
        let url = self.endpoint(&["admin", "countries", id]);
        tracing::debug!("📡 PUT {}", url);
        self.expect_success(
            self.admin(self.client.put(url).json(payload), session),
            "update country",
            &format!("Country '{}'", id),
            "Failed to update country",
        )
        .await
    }

    async fn delete_country(&self, session: &Session, id: &str) -> Result<()> {
        let url = self.endpoint(&["admin", "countries", id]);
        tracing::debug!("📡 DELETE {}", url);
        self.expect_success(
            self.admin(self.client.delete(url), session),
            "delete country",
            &format!("Country '{}'", id),
            "Failed to delete country",
        )
        .await
    }

    async fn create_blog(&self, session: &Session, payload: &BlogPayload) -> Result<()> {
        payload.validate()?;
        let url = self.endpoint(&["admin", "blogs"]);
        tracing::debug!("📡 POST {}", url);
        self.expect_success(
            self.admin(self.client.post(url).json(payload), session),
            "create blog",
            "Blogs endpoint",
            "Failed to create blog",
        )
        .await
    }

    async fn fetch_admin_blog(&self, session: &Session, id: &str) -> Result<Blog> {
        let url = self.endpoint(&["admin", "blogs", id]);
        tracing::debug!("📡 GET {}", url);
        let resource = format!("Blog '{}'", id);
        let envelope: BlogEnvelope = self
            .read_json(
                self.admin(self.client.get(url), session),
                "admin blog",
                &resource,
                "Failed to load blog",
            )
            .await?;
        envelope.blog.ok_or(PortalError::NotFound { resource })
    }

    async fn update_blog(&self, session: &Session, id: &str, payload: &BlogPayload) -> Result<()> {
        payload.validate()?;
        let url = self.endpoint(&["admin", "blogs", id]);
        tracing::debug!("📡 PUT {}", url);
        self.expect_success(
            self.admin(self.client.put(url).json(payload), session),
            "update blog",
            &format!("Blog '{}'", id),
            "Failed to update blog",
        )
        .await
    }

    async fn delete_blog(&self, session: &Session, id: &str) -> Result<()> {
        let url = self.endpoint(&["admin", "blogs", id]);
        tracing::debug!("📡 DELETE {}", url);
        self.expect_success(
            self.admin(self.client.delete(url), session),
            "delete blog",
            &format!("Blog '{}'", id),
            "Failed to delete blog",
        )
        .await
    }
}
