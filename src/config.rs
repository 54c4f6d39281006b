use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub llm_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub max_questions: usize,
    pub passage_word_count: usize,
    pub generate_rps: u32,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8000"),
            gemini_api_key: get_env("GEMINI_API_KEY")?,
            gemini_base_url: get_env_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            gemini_model: get_env_or("GEMINI_MODEL", "gemini-2.5-flash-preview-09-2025"),
            llm_timeout_secs: get_env_parse_or("LLM_TIMEOUT_SECS", 90)?,
            fetch_timeout_secs: get_env_parse_or("FETCH_TIMEOUT_SECS", 10)?,
            max_questions: get_env_parse_or("MAX_QUESTIONS", 25)?,
            passage_word_count: get_env_parse_or("PASSAGE_WORD_COUNT", 400)?,
            generate_rps: get_env_parse_or("GENERATE_RPS", 10)?,
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_accepts_numbers() {
        let v: u64 = parse_value("LLM_TIMEOUT_SECS", " 45 ").unwrap();
        assert_eq!(v, 45);
    }

    #[test]
    fn parse_value_rejects_garbage() {
        let err = parse_value::<usize>("MAX_QUESTIONS", "lots").unwrap_err();
        assert!(err.to_string().contains("MAX_QUESTIONS"));
    }

    #[test]
    fn missing_variable_is_a_config_error() {
        let err = get_env("QUIZGEN_SURELY_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn default_used_when_unset() {
        assert_eq!(get_env_or("QUIZGEN_SURELY_UNSET_VARIABLE", "x"), "x");
        let n: u32 = get_env_parse_or("QUIZGEN_SURELY_UNSET_NUMBER", 7).unwrap();
        assert_eq!(n, 7);
    }
}
