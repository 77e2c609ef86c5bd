//! App module - contains the main application state and logic

mod submit;
mod views;

use crate::api::{HttpEndpoint, PredictionEndpoint};
use crate::controller::Controller;
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use submit::PendingSubmission;
use tracing::{info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) controller: Controller,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) endpoint: Arc<HttpEndpoint>,
    pub(crate) pending: Option<PendingSubmission>,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) show_settings: bool,
    pub(crate) backend_url_input: String,
    pub(crate) settings_error: Option<String>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new()?;
        let endpoint = HttpEndpoint::new(settings.backend_url(), settings.connect_timeout())?;
        info!(url = endpoint.url(), "Prediction endpoint configured");

        Ok(Self {
            controller: Controller::new(),
            runtime,
            endpoint: Arc::new(endpoint),
            pending: None,
            backend_url_input: settings.backend_url().to_string(),
            settings,
            show_settings: false,
            settings_error: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        })
    }

    pub fn save_settings(&self) {
        let mut settings = self.settings.clone();
        settings.window_x = self.window_pos.map(|p| p.x);
        settings.window_y = self.window_pos.map(|p| p.y);
        settings.window_w = self.window_size.map(|s| s.x);
        settings.window_h = self.window_size.map(|s| s.y);
        settings.save(&self.data_dir);
    }

    /// Point future requests at a new backend. A request already in flight keeps its endpoint.
    pub fn apply_backend_url(&mut self) {
        let url = self.backend_url_input.trim().to_string();
        if url == self.settings.backend_url() {
            self.settings_error = None;
            return;
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            self.settings_error = Some("URL harus diawali http:// atau https://".to_string());
            return;
        }
        match HttpEndpoint::new(&url, self.settings.connect_timeout()) {
            Ok(endpoint) => {
                info!(url = endpoint.url(), "Prediction endpoint changed");
                self.endpoint = Arc::new(endpoint);
                self.settings.set_backend_url(url);
                self.settings_error = None;
                self.save_settings();
            }
            Err(e) => {
                warn!(error = %e, "Failed to build HTTP client for new backend");
                self.settings_error = Some(e.to_string());
            }
        }
    }
}
