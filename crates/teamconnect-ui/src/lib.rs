//! # teamconnect-ui
//!
//! View state behind the TeamConnect pages, kept free of any rendering
//! toolkit so the CLI and the dashboard session can share it.

pub mod filter;
pub mod forms;
pub mod notifications;
pub mod preferences;
pub mod preview;
pub mod sidebar;
pub mod tabs;
pub mod theme;
pub mod upload;
pub mod view;

pub use filter::{ContentFilter, FileEntry, MessageEntry, Searchable, SnippetEntry, Visibility};
pub use forms::{MessageForm, SubmitButton};
pub use notifications::{NotificationCenter, NotificationKind, Toast};
pub use preferences::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use preview::CodePreview;
pub use sidebar::{ClickTarget, MobileSidebar};
pub use tabs::TabSet;
pub use theme::{Theme, ThemeManager};
pub use upload::{StagedFile, UploadStager};
pub use view::{DashboardView, ViewCommand};
