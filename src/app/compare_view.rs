use crate::core::navigation::{Navigator, Route};
use crate::core::selection::{MIN_COMPARE, SLOT_COUNT};
use crate::core::table::{self, ComparisonTable};
use crate::domain::model::College;
use crate::utils::error::Result;

pub const FALLBACK_MESSAGE: &str = "Please select at least 2 colleges to compare.";
pub const GO_BACK_LABEL: &str = "Go Back";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPrompt {
    pub message: &'static str,
    pub action_label: &'static str,
    pub action: Route,
}

impl Default for FallbackPrompt {
    fn default() -> Self {
        Self {
            message: FALLBACK_MESSAGE,
            action_label: GO_BACK_LABEL,
            action: Route::Home,
        }
    }
}

/// `/compare-colleges` 的畫面
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareView {
    Table(ComparisonTable),
    Fallback(FallbackPrompt),
}

impl CompareView {
    /// 直接打開網址或重新整理時沒有暫存狀態，顯示提示
    pub fn from_navigator(navigator: &mut Navigator) -> Result<Self> {
        let colleges = navigator
            .take_state()
            .map(|state| state.colleges)
            .unwrap_or_default();
        Self::from_colleges(&colleges)
    }

    pub fn from_colleges(colleges: &[College]) -> Result<Self> {
        if !(MIN_COMPARE..=SLOT_COUNT).contains(&colleges.len()) {
            tracing::debug!(
                "Comparison view opened with {} colleges, showing fallback",
                colleges.len()
            );
            return Ok(CompareView::Fallback(FallbackPrompt::default()));
        }
        Ok(CompareView::Table(table::build(colleges)?))
    }

    pub fn table(&self) -> Option<&ComparisonTable> {
        match self {
            CompareView::Table(table) => Some(table),
            CompareView::Fallback(_) => None,
        }
    }

    /// 按下 "Go Back"
    pub fn go_back(&self, navigator: &mut Navigator) {
        if let CompareView::Fallback(prompt) = self {
            navigator.navigate(prompt.action.clone());
        }
    }
}
