use rand::RngCore;

use app_api::AppContext;

/// Header carrying the per-run API token.
pub const TOKEN_HEADER: &str = "x-meter-token";

#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    pub api_token: String,
}

impl HttpState {
    pub fn new(context: AppContext, api_token: String) -> Self {
        Self { context, api_token }
    }
}

pub fn generate_api_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}
