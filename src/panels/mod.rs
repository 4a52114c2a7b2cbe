mod central_panel;
mod tools_panel;

pub use central_panel::{TextEditSession, central_panel};
pub use tools_panel::{ToolbarAction, ToolbarState, tools_panel};
