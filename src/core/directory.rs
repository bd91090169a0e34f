use crate::domain::model::College;
use crate::domain::ports::CatalogBackend;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 一次頁面工作階段內的學校目錄；填好之後唯讀，複製只是增加參考計數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    colleges: Arc<[College]>,
}

impl Directory {
    pub fn new(colleges: Vec<College>) -> Self {
        Self {
            colleges: Arc::from(colleges),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }

    pub fn as_slice(&self) -> &[College] {
        &self.colleges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, College> {
        self.colleges.iter()
    }

    pub fn get(&self, id: &str) -> Option<&College> {
        self.colleges.iter().find(|college| college.id == id)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<College> for Directory {
    fn from_iter<I: IntoIterator<Item = College>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a College;
    type IntoIter = std::slice::Iter<'a, College>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryState {
    Loading,
    Ready(Directory),
}

impl DirectoryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DirectoryState::Loading)
    }

    pub fn directory(&self) -> Option<&Directory> {
        match self {
            DirectoryState::Loading => None,
            DirectoryState::Ready(directory) => Some(directory),
        }
    }
}

/// 抓取 `/colleges`；任何失敗都吞掉，回傳空目錄
pub async fn load_directory(backend: &dyn CatalogBackend) -> Directory {
    match backend.fetch_colleges().await {
        Ok(colleges) => {
            tracing::debug!("Loaded {} colleges into directory", colleges.len());
            Directory::new(colleges)
        }
        Err(e) => {
            tracing::warn!("⚠️ College directory fetch failed, continuing with empty list: {}", e);
            Directory::empty()
        }
    }
}

/// 背景中的目錄抓取。持有者被丟棄時任務一併中止，結果不會寫回已經關閉的畫面
#[derive(Debug)]
pub struct DirectoryLoad {
    handle: Option<JoinHandle<Directory>>,
}

impl DirectoryLoad {
    pub fn spawn(backend: Arc<dyn CatalogBackend>) -> Self {
        let handle = tokio::spawn(async move { load_directory(backend.as_ref()).await });
        Self {
            handle: Some(handle),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(true)
    }

    pub async fn wait(mut self) -> Directory {
        let Some(handle) = self.handle.take() else {
            return Directory::empty();
        };

        match handle.await {
            Ok(directory) => directory,
            Err(e) => {
                tracing::warn!("⚠️ College directory task did not complete: {}", e);
                Directory::empty()
            }
        }
    }

    pub fn cancel(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                tracing::debug!("Aborting in-flight college directory fetch");
            }
            handle.abort();
        }
    }
}

impl Drop for DirectoryLoad {
    fn drop(&mut self) {
        self.abort();
    }
}
