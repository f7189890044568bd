/// Environment variable holding the Cosense session id (`connect.sid` cookie)
pub const SESSION_ENV_VAR: &str = "COSENSE_SID";

/// Reads the session credential from the environment
///
/// Call `dotenvy::dotenv()` first if a `.env` file should be honoured. An
/// empty value is treated as unset, which restricts access to public pages.
pub fn load_session_id() -> Option<String> {
    std::env::var(SESSION_ENV_VAR)
        .ok()
        .map(|sid| sid.trim().to_string())
        .filter(|sid| !sid.is_empty())
}
