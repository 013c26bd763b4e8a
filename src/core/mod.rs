pub mod archive;
pub mod mapping;
pub mod navigation;
pub mod screens;
pub mod selection;
pub mod session;
pub mod utils;

pub use archive::{ArchiveEntry, ArchiveView, DetailSection, RecordDetail};
pub use navigation::{ConfirmOutcome, NavigationController, PendingAction, Screen};
pub use screens::{ButtonGroup, FormScreen, FormScreens, Selectable, SelectionButton};
pub use selection::SelectionStore;
pub use session::{EditContext, Session};
