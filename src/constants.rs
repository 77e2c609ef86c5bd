//! Application constants and configuration

pub const APP_NAME: &str = "Rumah Price Predictor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend the Flask model server listens on by default
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const PREDICT_PATH: &str = "/predict";
pub const BACKEND_URL_ENV: &str = "RUMAH_BACKEND_URL";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Number of recent predictions kept in the history list
pub const HISTORY_CAPACITY: usize = 3;

/// Tier cutoffs in rupiah (strict "less than")
pub const AFFORDABLE_LIMIT: f64 = 500_000_000.0;
pub const MID_RANGE_LIMIT: f64 = 1_500_000_000.0;

pub const VALIDATION_MESSAGE: &str = "Mohon isi semua field dengan angka valid";
pub const TRANSPORT_MESSAGE: &str =
    "Gagal terhubung ke server prediksi (cek apakah backend berjalan)";
