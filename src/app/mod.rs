//! 畫面層：把 core 的元件組成使用者看到的流程

pub mod admin;
pub mod compare_view;
pub mod picker;

pub use admin::AdminConsole;
pub use compare_view::{CompareView, FallbackPrompt};
pub use picker::ComparisonPicker;
