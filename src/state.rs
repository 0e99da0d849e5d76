use crate::api_client::ApiClient;
use crate::config::Config;

pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let api = ApiClient::new(config.api_base_url.clone());
        AppState { config, api }
    }
}
