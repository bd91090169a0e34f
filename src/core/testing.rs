//! 單元測試共用的假資料與假後端

use crate::domain::model::{
    Blog, BlogSummary, College, CollegeDetail, Country, CountrySummary, InterestForm,
};
use crate::domain::ports::CatalogBackend;
use crate::utils::error::{PortalError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) fn college(id: &str, name: &str, country: &str, state: &str) -> College {
    College {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        state: state.to_string(),
        logo_link: format!("https://cdn.example.com/{}.png", id),
        year_of_establishment: 1900,
        duration: "4 Years".to_string(),
        recognition: "Accredited".to_string(),
        medium: "English".to_string(),
        intake: "September".to_string(),
    }
}

pub(crate) fn sample_colleges() -> Vec<College> {
    vec![
        College {
            year_of_establishment: 1636,
            ..college("harvard", "Harvard", "US", "Massachusetts")
        },
        College {
            year_of_establishment: 1096,
            ..college("oxford", "Oxford", "UK", "England")
        },
        College {
            year_of_establishment: 1922,
            ..college("du", "Delhi University", "IN", "Delhi")
        },
    ]
}

#[derive(Default)]
pub(crate) struct StubCatalog {
    colleges: Option<Vec<College>>,
    countries: Vec<CountrySummary>,
    blogs: Vec<BlogSummary>,
    delay: Duration,
    completed: AtomicBool,
    college_calls: AtomicUsize,
    country_calls: AtomicUsize,
    blog_calls: AtomicUsize,
    submitted: Mutex<Vec<InterestForm>>,
}

impl StubCatalog {
    pub(crate) fn with_colleges(colleges: Vec<College>) -> Self {
        Self {
            colleges: Some(colleges),
            countries: vec![CountrySummary {
                id: "in".to_string(),
                name: "India".to_string(),
                flag_image: String::new(),
            }],
            blogs: vec![BlogSummary {
                id: "b1".to_string(),
                title: "Visa tips".to_string(),
                author: "Team".to_string(),
                image_url: String::new(),
                created_at: "2024-03-05T10:00:00Z".to_string(),
            }],
            ..Default::default()
        }
    }

    /// `/colleges` 一律回 500
    pub(crate) fn failing() -> Self {
        Self::default()
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    pub(crate) fn college_calls(&self) -> usize {
        self.college_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn country_calls(&self) -> usize {
        self.country_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn blog_calls(&self) -> usize {
        self.blog_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn submitted(&self) -> Vec<InterestForm> {
        self.submitted.lock().map(|forms| forms.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CatalogBackend for StubCatalog {
    async fn fetch_colleges(&self) -> Result<Vec<College>> {
        self.college_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.completed.store(true, Ordering::SeqCst);
        self.colleges.clone().ok_or(PortalError::BackendError {
            status: 500,
            message: "Internal Server Error".to_string(),
        })
    }

    async fn fetch_college(&self, id: &str) -> Result<CollegeDetail> {
        let college = self
            .colleges
            .iter()
            .flatten()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| PortalError::NotFound {
                resource: format!("College '{}'", id),
            })?;
        Ok(CollegeDetail {
            college,
            intro: "Intro".to_string(),
            course_fees: String::new(),
            admission_eligibility: String::new(),
            benefits: String::new(),
            campus_info: String::new(),
            created_at: String::new(),
        })
    }

    async fn fetch_countries(&self) -> Result<Vec<CountrySummary>> {
        self.country_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.countries.clone())
    }

    async fn fetch_country(&self, id: &str) -> Result<Country> {
        Err(PortalError::NotFound {
            resource: format!("Country '{}'", id),
        })
    }

    async fn fetch_blogs(&self) -> Result<Vec<BlogSummary>> {
        self.blog_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.blogs.clone())
    }

    async fn fetch_blog(&self, id: &str) -> Result<Blog> {
        Err(PortalError::NotFound {
            resource: format!("Blog '{}'", id),
        })
    }

    async fn submit_interest(&self, form: &InterestForm) -> Result<()> {
        if let Ok(mut forms) = self.submitted.lock() {
            forms.push(form.clone());
        }
        Ok(())
    }
}
