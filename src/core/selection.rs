use crate::core::directory::Directory;
use crate::domain::model::College;
use crate::utils::error::{PortalError, Result};
use serde::Serialize;

pub const SLOT_COUNT: usize = 3;
pub const MIN_COMPARE: usize = 2;

/// 三個固定的比較欄位，每格存學校 id，比較時再回目錄解析。
/// 同一所學校可以同時放進兩格，這裡刻意不檢查
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    slots: [Option<String>; SLOT_COUNT],
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_index(index: usize) -> Result<()> {
        if index >= SLOT_COUNT {
            return Err(PortalError::SlotOutOfRange {
                index,
                max: SLOT_COUNT,
            });
        }
        Ok(())
    }

    /// 回傳被取代的 id（若原本有值）
    pub fn select(&mut self, index: usize, college: &College) -> Result<Option<String>> {
        Self::check_index(index)?;
        tracing::debug!("Slot {} <- {}", index, college.id);
        Ok(self.slots[index].replace(college.id.clone()))
    }

    pub fn remove(&mut self, index: usize) -> Result<Option<String>> {
        Self::check_index(index)?;
        Ok(self.slots[index].take())
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    pub fn slots(&self) -> &[Option<String>; SLOT_COUNT] {
        &self.slots
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// 依欄位順序取出已選學校，空格略過
    pub fn compare_now(&self, directory: &Directory) -> Result<ComparisonRequest> {
        let selected = self.active_count();
        if selected < MIN_COMPARE {
            return Err(PortalError::InsufficientSelection { selected });
        }

        let colleges = self
            .slots
            .iter()
            .flatten()
            .map(|id| {
                directory
                    .get(id)
                    .cloned()
                    .ok_or_else(|| PortalError::UnknownCollege { id: id.clone() })
            })
            .collect::<Result<Vec<_>>>()?;

        ComparisonRequest::new(colleges)
    }
}

/// 按下 "Compare Now" 時產生、交給比較頁使用一次的學校清單（2 到 3 所）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRequest {
    colleges: Vec<College>,
}

impl ComparisonRequest {
    pub fn new(colleges: Vec<College>) -> Result<Self> {
        if colleges.len() < MIN_COMPARE {
            return Err(PortalError::InsufficientSelection {
                selected: colleges.len(),
            });
        }
        if colleges.len() > SLOT_COUNT {
            return Err(PortalError::ValidationError {
                message: format!("At most {} colleges can be compared", SLOT_COUNT),
            });
        }
        Ok(Self { colleges })
    }

    pub fn colleges(&self) -> &[College] {
        &self.colleges
    }

    pub fn into_colleges(self) -> Vec<College> {
        self.colleges
    }
}
