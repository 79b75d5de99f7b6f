use std::env;

/// Public Firebase web-app settings. None of these are secrets.
#[derive(Debug, Clone, Default)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// REST API root, without trailing slash
    pub api_base_url: String,
    pub dev_mode: bool,
    pub firebase: FirebaseConfig,
    /// Auth emulator origin; only honoured in dev mode
    pub auth_emulator_url: String,
    /// SQLite file backing the durable key-value store
    pub storage_path: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("SEMILLAS_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs: u64 = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Self {
            api_base_url,
            dev_mode,
            firebase: FirebaseConfig {
                api_key: env::var("FIREBASE_API_KEY").unwrap_or_default(),
                auth_domain: env::var("FIREBASE_AUTH_DOMAIN").ok(),
                project_id: env::var("FIREBASE_PROJECT_ID").ok(),
            },
            auth_emulator_url: env::var("AUTH_EMULATOR_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:9099".to_string()),
            storage_path: env::var("STORAGE_PATH").unwrap_or_else(|_| "semillas.db".to_string()),
            request_timeout_secs,
        }
    }

    /// Identity Toolkit root: the emulator in dev mode, Google otherwise.
    pub fn identity_base_url(&self) -> String {
        if self.dev_mode {
            format!(
                "{}/identitytoolkit.googleapis.com",
                self.auth_emulator_url.trim_end_matches('/')
            )
        } else {
            crate::auth::IDENTITY_TOOLKIT_URL.to_string()
        }
    }
}
