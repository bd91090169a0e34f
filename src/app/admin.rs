use crate::core::search;
use crate::core::session::SessionContext;
use crate::domain::model::{Blog, BlogPayload, CollegePayload, CountryPayload, Customer};
use crate::domain::ports::AdminBackend;
use crate::utils::error::{PortalError, Result};

/// 後台畫面的操作。後端回 401/403 時 session 直接作廢，下一次導覽會被導回登入頁
pub struct AdminConsole<B: AdminBackend> {
    backend: B,
}

impl<B: AdminBackend> AdminConsole<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 列出潛在客戶；query 為空時全部回傳
    pub async fn customers(
        &self,
        context: &mut SessionContext,
        query: &str,
    ) -> Result<Vec<Customer>> {
        let session = context.require()?.clone();
        let result = self.backend.list_customers(&session).await;
        let customers = settle(context, result)?;
        tracing::debug!("Loaded {} customers", customers.len());
        Ok(search::filter_customers(&customers, query))
    }

    pub async fn update_college(
        &self,
        context: &mut SessionContext,
        id: &str,
        payload: &CollegePayload,
    ) -> Result<()> {
        let session = context.require()?.clone();
        let result = self.backend.update_college(&session, id, payload).await;
        settle(context, result)?;
        tracing::info!("✏️ College {} updated", id);
        Ok(())
    }

    pub async fn delete_college(&self, context: &mut SessionContext, id: &str) -> Result<()> {
        let session = context.require()?.clone();
        let result = self.backend.delete_college(&session, id).await;
        settle(context, result)?;
        tracing::info!("🗑️ College {} deleted", id);
        Ok(())
    }

    pub async fn update_country(
        &self,
        context: &mut SessionContext,
        id: &str,
        payload: &CountryPayload,
    ) -> Result<()> {
        let session = context.require()?.clone();
        let result = self.backend.update_country(&session, id, payload).await;
        settle(context, result)?;
        tracing::info!("✏️ Country {} updated", id);
        Ok(())
    }

    pub async fn delete_country(&self, context: &mut SessionContext, id: &str) -> Result<()> {
        let session = context.require()?.clone();
        let result = self.backend.delete_country(&session, id).await;
        settle(context, result)?;
        tracing::info!("🗑️ Country {} deleted", id);
        Ok(())
    }

    pub async fn create_blog(
        &self,
        context: &mut SessionContext,
        payload: &BlogPayload,
    ) -> Result<()> {
        let session = context.require()?.clone();
        let result = self.backend.create_blog(&session, payload).await;
        settle(context, result)?;
        tracing::info!("📝 Blog '{}' created", payload.title);
        Ok(())
    }

    pub async fn blog(&self, context: &mut SessionContext, id: &str) -> Result<Blog> {
        let session = context.require()?.clone();
        let result = self.backend.fetch_admin_blog(&session, id).await;
        settle(context, result)
    }

    pub async fn update_blog(
        &self,
        context: &mut SessionContext,
        id: &str,
        payload: &BlogPayload,
    ) -> Result<()> {
        let session = context.require()?.clone();
        let result = self.backend.update_blog(&session, id, payload).await;
        settle(context, result)?;
        tracing::info!("✏️ Blog {} updated", id);
        Ok(())
    }

    pub async fn delete_blog(&self, context: &mut SessionContext, id: &str) -> Result<()> {
        let session = context.require()?.clone();
        let result = self.backend.delete_blog(&session, id).await;
        settle(context, result)?;
        tracing::info!("🗑️ Blog {} deleted", id);
        Ok(())
    }
}

fn settle<T>(context: &mut SessionContext, result: Result<T>) -> Result<T> {
    if let Err(PortalError::Unauthorized { message }) = &result {
        tracing::warn!("⚠️ Backend rejected admin session: {}", message);
        context.invalidate();
    }
    result
}
