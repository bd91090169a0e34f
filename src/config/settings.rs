use crate::config::toml_config::TomlConfig;
use crate::core::cache::RefetchPolicy;
use crate::core::session::SessionContext;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// 合併後的執行設定：旗標 / 環境變數 > TOML > 預設值
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub timeout: Option<Duration>,
    pub refetch: RefetchPolicy,
    admin_token: Option<String>,
    admin_user: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: None,
            refetch: RefetchPolicy::Session,
            admin_token: None,
            admin_user: None,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("backend_url", &self.backend_url)
            .field("timeout", &self.timeout)
            .field("refetch", &self.refetch)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "***"))
            .field("admin_user", &self.admin_user)
            .finish()
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            backend_url: config
                .base_url()
                .map(str::to_string)
                .unwrap_or(defaults.backend_url),
            timeout: config.timeout_seconds().map(Duration::from_secs),
            refetch: config
                .ttl_seconds()
                .map(|ttl| RefetchPolicy::Ttl(Duration::from_secs(ttl)))
                .unwrap_or_default(),
            admin_token: config.session_token().map(str::to_string),
            admin_user: config.session_user().map(str::to_string),
        }
    }

    pub fn with_backend_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.backend_url = url;
        }
        self
    }

    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        if token.is_some() {
            self.admin_token = token;
        }
        self
    }

    pub fn with_admin_user(mut self, user: Option<String>) -> Self {
        if user.is_some() {
            self.admin_user = user;
        }
        self
    }

    /// 保存的 token 與使用者還原成 session；不完整就是未登入
    /// 後台指令一定要有 token
    pub fn require_admin_token(&self) -> Result<&str> {
        validation::validate_required_field("session.token", &self.admin_token).map(String::as_str)
    }

    pub fn session_context(&self) -> SessionContext {
        SessionContext::from_stored(self.admin_token.as_deref(), self.admin_user.as_deref())
    }
}

impl ConfigProvider for Settings {
    fn backend_base_url(&self) -> &str {
        &self.backend_url
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("backend.base_url", &self.backend_url)?;
        if let Some(timeout) = self.timeout {
            validation::validate_positive_number("backend.timeout_seconds", timeout.as_secs(), 1)?;
        }
        Ok(())
    }
}
