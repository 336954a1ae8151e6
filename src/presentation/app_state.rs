// Application state for HTTP handlers
use crate::domain::dashboard::Dashboard;
use crate::infrastructure::json_mapper::dashboard_to_payload;
use crate::infrastructure::page::render_index;

/// Everything the handlers serve, rendered once at startup.
pub struct AppState {
    pub page_html: String,
    pub dashboard_json: Vec<u8>,
}

impl AppState {
    pub fn from_dashboard(dashboard: Dashboard) -> anyhow::Result<Self> {
        let page_html = render_index(&dashboard.title);
        let dashboard_json = serde_json::to_vec(&dashboard_to_payload(dashboard))?;
        Ok(Self {
            page_html,
            dashboard_json,
        })
    }
}
