//! Archive password sourcing: env var → .env in dir → secure prompt.

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::path::Path;

const ENV_KEY: &str = "SPLITARC_PASSWORD";

fn try_env_then_dotenv(dir: &Path) -> Option<String> {
    if let Ok(s) = std::env::var(ENV_KEY) {
        let s = s.trim().to_string();
        if !s.is_empty() {
            return Some(s);
        }
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Ok(s) = std::env::var(ENV_KEY) {
            let s = s.trim().to_string();
            if !s.is_empty() {
                return Some(s);
            }
        }
    }
    None
}

/// Read the archive password: env (SPLITARC_PASSWORD) → .env in `dir` →
/// secure prompt. The password is passed to the external archiver, which
/// does the actual encryption.
pub fn get_password(dir: &Path) -> Result<String> {
    if let Some(s) = try_env_then_dotenv(dir) {
        info!("Password found in environment");
        return Ok(s);
    }
    let label = format!("[{}]", env!("CARGO_PKG_NAME")).cyan().bold();
    let pass = rpassword::prompt_password(format!("{label} Archive password: "))
        .context("read password")?;
    Ok(pass.trim().to_string())
}
