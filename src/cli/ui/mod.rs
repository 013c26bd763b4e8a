pub mod detail_view;
pub mod formatting;
pub mod menu_renderer;
pub mod prompts;
pub mod test_mode;

pub use detail_view::DetailView;
pub use formatting::Formatter;
pub use menu_renderer::{MenuRenderError, MenuRenderer, MenuUI, MenuUIItem};
