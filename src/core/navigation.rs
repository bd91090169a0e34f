use crate::core::selection::ComparisonRequest;
use crate::core::session::{Access, SessionContext};
use crate::domain::model::College;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 網站的所有頁面
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    CompareColleges,
    Colleges,
    CollegeDetail(String),
    CountryDetail(String),
    Blogs,
    BlogDetail(String),
    AdminLogin,
    AdminHome,
    AdminColleges,
    AdminEditCollege(String),
    AdminCountries,
    AdminEditCountry(String),
    AdminBlogs,
    AdminAddBlog,
    AdminEditBlog(String),
    AdminCustomers,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["compare-colleges"] => Route::CompareColleges,
            ["colleges"] => Route::Colleges,
            ["colleges", id] => Route::CollegeDetail(id.to_string()),
            ["countries", id] => Route::CountryDetail(id.to_string()),
            ["blogs"] => Route::Blogs,
            ["blogs", id] => Route::BlogDetail(id.to_string()),
            ["admin"] => Route::AdminLogin,
            ["admin", "home"] => Route::AdminHome,
            ["admin", "colleges"] => Route::AdminColleges,
            ["admin", "colleges", "edit", id] => Route::AdminEditCollege(id.to_string()),
            ["admin", "countries"] => Route::AdminCountries,
            ["admin", "countries", "edit", id] => Route::AdminEditCountry(id.to_string()),
            ["admin", "blogs"] => Route::AdminBlogs,
            ["admin", "blogs", "add"] => Route::AdminAddBlog,
            ["admin", "blogs", "edit", id] => Route::AdminEditBlog(id.to_string()),
            ["admin", "customers"] => Route::AdminCustomers,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CompareColleges => "/compare-colleges".to_string(),
            Route::Colleges => "/colleges".to_string(),
            Route::CollegeDetail(id) => format!("/colleges/{}", id),
            Route::CountryDetail(id) => format!("/countries/{}", id),
            Route::Blogs => "/blogs".to_string(),
            Route::BlogDetail(id) => format!("/blogs/{}", id),
            Route::AdminLogin => "/admin".to_string(),
            Route::AdminHome => "/admin/home".to_string(),
            Route::AdminColleges => "/admin/colleges".to_string(),
            Route::AdminEditCollege(id) => format!("/admin/colleges/edit/{}", id),
            Route::AdminCountries => "/admin/countries".to_string(),
            Route::AdminEditCountry(id) => format!("/admin/countries/edit/{}", id),
            Route::AdminBlogs => "/admin/blogs".to_string(),
            Route::AdminAddBlog => "/admin/blogs/add".to_string(),
            Route::AdminEditBlog(id) => format!("/admin/blogs/edit/{}", id),
            Route::AdminCustomers => "/admin/customers".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// `/admin` 本身是登入頁，不需要 session
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::AdminHome
                | Route::AdminColleges
                | Route::AdminEditCollege(_)
                | Route::AdminCountries
                | Route::AdminEditCountry(_)
                | Route::AdminBlogs
                | Route::AdminAddBlog
                | Route::AdminEditBlog(_)
                | Route::AdminCustomers
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// 跟著一次路由切換傳遞的暫存資料，不進網址也不落地
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub colleges: Vec<College>,
}

impl From<ComparisonRequest> for NavigationState {
    fn from(request: ComparisonRequest) -> Self {
        Self {
            colleges: request.into_colleges(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Route>,
    pending: Option<NavigationState>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            history: vec![Route::Home],
            pending: None,
        }
    }

    pub fn current(&self) -> &Route {
        // history 永遠至少有一筆
        self.history.last().unwrap_or(&Route::Home)
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn navigate(&mut self, route: Route) -> &Route {
        tracing::debug!("Navigate {} -> {}", self.current(), route);
        self.pending = None;
        self.history.push(route);
        self.current()
    }

    pub fn navigate_with_state(&mut self, route: Route, state: NavigationState) -> &Route {
        tracing::debug!(
            "Navigate {} -> {} with {} colleges in state",
            self.current(),
            route,
            state.colleges.len()
        );
        self.history.push(route);
        self.pending = Some(state);
        self.current()
    }

    /// 受保護頁面在沒有 session 時改導向登入頁，並取代而不是疊加歷史
    pub fn visit(&mut self, route: Route, session: &SessionContext) -> &Route {
        match session.guard(&route) {
            Access::Granted => self.navigate(route),
            Access::Redirect(target) => {
                tracing::info!("🔒 {} requires an admin session, redirecting to {}", route, target);
                self.pending = None;
                self.history.push(target);
                self.current()
            }
        }
    }

    /// 只能取一次；之後回傳 None
    pub fn take_state(&mut self) -> Option<NavigationState> {
        self.pending.take()
    }

    pub fn back(&mut self) -> &Route {
        if self.history.len() > 1 {
            self.history.pop();
        }
        self.pending = None;
        self.current()
    }
}
