use crate::core::navigation::Route;
use crate::domain::model::AdminUser;
use crate::utils::error::{PortalError, Result};

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: AdminUser,
}

impl Session {
    pub fn new(token: impl Into<String>, user: AdminUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &AdminUser {
        &self.user
    }
}

// token 不進日誌
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(Route),
}

/// 後台登入狀態，明確地往下傳，不從全域儲存讀取
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    session: Option<Session>,
}

impl SessionContext {
    pub fn new(session: Option<Session>) -> Self {
        Self { session }
    }

    /// 由外部保存的 token 與使用者 JSON 還原；缺一或 JSON 壞掉都視為未登入
    pub fn from_stored(token: Option<&str>, user_json: Option<&str>) -> Self {
        let (Some(token), Some(user_json)) = (token, user_json) else {
            return Self::default();
        };
        if token.trim().is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<AdminUser>(user_json) {
            Ok(user) => Self::new(Some(Session::new(token, user))),
            Err(e) => {
                tracing::warn!("⚠️ Discarding stored admin session with unreadable user: {}", e);
                Self::default()
            }
        }
    }

    pub fn establish(&mut self, session: Session) {
        tracing::info!("🔑 Admin session established for {}", session.user().username);
        self.session = Some(session);
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn require(&self) -> Result<&Session> {
        self.session.as_ref().ok_or_else(|| PortalError::Unauthorized {
            message: "No admin session".to_string(),
        })
    }

    pub fn invalidate(&mut self) -> Option<Session> {
        let previous = self.session.take();
        if let Some(session) = &previous {
            tracing::info!("🔓 Admin session for {} invalidated", session.user().username);
        }
        previous
    }

    pub fn guard(&self, route: &Route) -> Access {
        if route.requires_session() && !self.is_authenticated() {
            Access::Redirect(Route::AdminLogin)
        } else {
            Access::Granted
        }
    }
}
