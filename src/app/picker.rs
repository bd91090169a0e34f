use crate::core::directory::{Directory, DirectoryState};
use crate::core::navigation::{NavigationState, Navigator, Route};
use crate::core::search;
use crate::core::selection::{SelectionSet, SLOT_COUNT};
use crate::domain::model::College;
use crate::utils::error::{PortalError, Result};

/// 首頁上的「比較學校」區塊：三個欄位、搜尋框與下拉候選清單
#[derive(Debug, Clone)]
pub struct ComparisonPicker {
    directory: DirectoryState,
    selection: SelectionSet,
    active_slot: Option<usize>,
    query: String,
    error_message: Option<String>,
}

impl Default for ComparisonPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonPicker {
    /// 目錄還在抓取中
    pub fn new() -> Self {
        Self {
            directory: DirectoryState::Loading,
            selection: SelectionSet::new(),
            active_slot: None,
            query: String::new(),
            error_message: None,
        }
    }

    pub fn with_directory(directory: Directory) -> Self {
        let mut picker = Self::new();
        picker.finish_loading(directory);
        picker
    }

    pub fn finish_loading(&mut self, directory: Directory) {
        tracing::debug!("Picker ready with {} colleges", directory.len());
        self.directory = DirectoryState::Ready(directory);
    }

    pub fn is_loading(&self) -> bool {
        self.directory.is_loading()
    }

    pub fn directory(&self) -> Option<&Directory> {
        self.directory.directory()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn active_slot(&self) -> Option<usize> {
        self.active_slot
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// 打開某一格的選單，搜尋字串重設
    pub fn open_slot(&mut self, index: usize) -> Result<()> {
        if index >= SLOT_COUNT {
            return Err(PortalError::SlotOutOfRange {
                index,
                max: SLOT_COUNT,
            });
        }
        self.active_slot = Some(index);
        self.query.clear();
        self.error_message = None;
        Ok(())
    }

    pub fn close_slot(&mut self) {
        self.active_slot = None;
        self.query.clear();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// 目前搜尋字串下的候選學校；載入中為空
    pub fn candidates(&self) -> Vec<&College> {
        match self.directory.directory() {
            Some(directory) => search::filter_iter(directory.as_slice(), &self.query).collect(),
            None => Vec::new(),
        }
    }

    /// 把學校放進目前打開的那一格，然後關閉選單
    pub fn choose(&mut self, college: &College) -> Result<()> {
        let index = self.active_slot.ok_or_else(|| PortalError::ValidationError {
            message: "Open a slot before choosing a college".to_string(),
        })?;

        self.selection.select(index, college)?;
        self.error_message = None;
        self.close_slot();
        Ok(())
    }

    pub fn choose_by_id(&mut self, id: &str) -> Result<()> {
        let college = self
            .directory()
            .and_then(|directory| directory.get(id))
            .cloned()
            .ok_or_else(|| PortalError::UnknownCollege { id: id.to_string() })?;
        self.choose(&college)
    }

    pub fn remove(&mut self, index: usize) -> Result<Option<String>> {
        let removed = self.selection.remove(index)?;
        self.error_message = None;
        Ok(removed)
    }

    pub fn slot_college(&self, index: usize) -> Option<&College> {
        let id = self.selection.slot(index)?;
        self.directory()?.get(id)
    }

    /// 不足兩所時只設定提示訊息，不離開首頁
    pub fn compare_now(&mut self, navigator: &mut Navigator) -> Result<()> {
        let directory = self.directory().cloned().unwrap_or_default();

        match self.selection.compare_now(&directory) {
            Ok(request) => {
                self.error_message = None;
                tracing::info!(
                    "⚖️ Comparing {} colleges",
                    request.colleges().len()
                );
                navigator.navigate_with_state(
                    Route::CompareColleges,
                    NavigationState::from(request),
                );
                Ok(())
            }
            Err(e) => {
                self.error_message = Some(e.user_friendly_message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::sample_colleges;

    fn ready() -> ComparisonPicker {
        ComparisonPicker::with_directory(Directory::new(sample_colleges()))
    }

    #[test]
    fn test_loading_picker_has_no_candidates() {
        let picker = ComparisonPicker::new();
        assert!(picker.is_loading());
        assert!(picker.candidates().is_empty());
    }

    #[test]
    fn test_query_narrows_candidates() {
        let mut picker = ready();
        picker.open_slot(0).unwrap();
        assert_eq!(picker.candidates().len(), 3);

        picker.set_query("univ");
        let names: Vec<&str> = picker.candidates().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Delhi University"]);

        picker.set_query("uk");
        let ids: Vec<&str> = picker.candidates().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["oxford"]);
    }

    #[test]
    fn test_choose_fills_open_slot_and_closes_menu() {
        let mut picker = ready();
        picker.open_slot(1).unwrap();
        picker.set_query("harv");
        picker.choose_by_id("harvard").unwrap();

        assert_eq!(picker.selection().slot(1), Some("harvard"));
        assert_eq!(picker.active_slot(), None);
        assert_eq!(picker.query(), "");
        assert_eq!(picker.slot_college(1).map(|c| c.name.as_str()), Some("Harvard"));
    }

    #[test]
    fn test_choose_without_open_slot_fails() {
        let mut picker = ready();
        assert!(picker.choose_by_id("harvard").is_err());
        assert!(picker.selection().is_empty());

        assert!(matches!(
            picker.open_slot(3),
            Err(PortalError::SlotOutOfRange { .. })
        ));
    }

    #[test]
    fn test_choose_unknown_id() {
        let mut picker = ready();
        picker.open_slot(0).unwrap();
        assert!(matches!(
            picker.choose_by_id("mit"),
            Err(PortalError::UnknownCollege { .. })
        ));
        assert_eq!(picker.active_slot(), Some(0));
    }

    #[test]
    fn test_compare_with_one_college_stays_home() {
        let mut picker = ready();
        let mut navigator = Navigator::new();
        picker.open_slot(0).unwrap();
        picker.choose_by_id("oxford").unwrap();

        assert!(picker.compare_now(&mut navigator).is_err());
        assert_eq!(
            picker.error_message(),
            Some("Please select at least 2 colleges to compare")
        );
        assert_eq!(navigator.current(), &Route::Home);
        assert!(navigator.take_state().is_none());
    }

    #[test]
    fn test_compare_navigates_with_state() {
        let mut picker = ready();
        let mut navigator = Navigator::new();
        picker.open_slot(2).unwrap();
        picker.choose_by_id("du").unwrap();
        picker.open_slot(0).unwrap();
        picker.choose_by_id("harvard").unwrap();

        picker.compare_now(&mut navigator).unwrap();

        assert_eq!(picker.error_message(), None);
        assert_eq!(navigator.current(), &Route::CompareColleges);
        let state = navigator.take_state().unwrap();
        let ids: Vec<&str> = state.colleges.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["harvard", "du"]);
    }

    #[test]
    fn test_successful_choice_clears_previous_error() {
        let mut picker = ready();
        let mut navigator = Navigator::new();
        assert!(picker.compare_now(&mut navigator).is_err());
        assert!(picker.error_message().is_some());

        picker.open_slot(0).unwrap();
        picker.choose_by_id("oxford").unwrap();
        assert!(picker.error_message().is_none());
    }

    #[test]
    fn test_opening_slot_clears_previous_error() {
        let mut picker = ready();
        let mut navigator = Navigator::new();
        assert!(picker.compare_now(&mut navigator).is_err());

        picker.open_slot(0).unwrap();
        assert!(picker.error_message().is_none());

        // 超出範圍的格子不算開始修正
        assert!(picker.compare_now(&mut navigator).is_err());
        assert!(picker.open_slot(3).is_err());
        assert!(picker.error_message().is_some());
    }

    #[test]
    fn test_removing_college_clears_previous_error() {
        let mut picker = ready();
        let mut navigator = Navigator::new();
        picker.open_slot(0).unwrap();
        picker.choose_by_id("oxford").unwrap();
        assert!(picker.compare_now(&mut navigator).is_err());
        assert!(picker.error_message().is_some());

        assert_eq!(picker.remove(0).unwrap().as_deref(), Some("oxford"));
        assert!(picker.error_message().is_none());
        assert!(picker.selection().is_empty());
    }

    #[test]
    fn test_remove_slot() {
        let mut picker = ready();
        picker.open_slot(0).unwrap();
        picker.choose_by_id("oxford").unwrap();

        assert_eq!(picker.remove(0).unwrap().as_deref(), Some("oxford"));
        assert!(picker.slot_college(0).is_none());
    }
}
