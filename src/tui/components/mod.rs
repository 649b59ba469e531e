// Components module - reusable UI building blocks
//
// Shell components are rendered on every screen:
// - Title bar: app name, active profile, activity spinner
// - Status bar: uptime, report count, calls in flight, focus hint
// - Logs panel: captured tracing output
//
// Screen panels own their view state (selection, scroll offsets) and are
// handed the data they draw by the view layer.

pub mod form_panel;
pub mod logs_panel;
pub mod profiles_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod table_panel;
pub mod title_bar;
pub mod toast;

pub use form_panel::FormPanel;
pub use logs_panel::LogsPanel;
pub use profiles_panel::ProfilesPanel;
pub use table_panel::TablePanel;
pub use toast::Toast;
