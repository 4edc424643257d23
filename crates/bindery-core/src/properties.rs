use std::collections::BTreeMap;
use std::path::Path;

use bindery_util::errors::BinderyError;

/// Env file read from the project root before the manifest is parsed.
pub const ENV_FILE: &str = ".bindery.env";

/// Loads a `.bindery.env` file (shell-style `KEY=value` format).
///
/// Private registry URLs often embed tokens; keeping them here lets
/// `Bindery.toml` refer to them as `${env:VAR}`.
pub fn load_env_file(path: &Path) -> Result<BTreeMap<String, String>, BinderyError> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            map.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
    }
    Ok(map)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Interpolate `${env:VAR}` references in a string.
///
/// Values come from `env_overrides` first, then the process environment.
/// Unknown variables expand to an empty string.
pub fn interpolate(input: &str, env_overrides: &BTreeMap<String, String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${env:") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let key = &rest[start + 6..start + len];
        let value = env_overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .unwrap_or_default();
        result.push_str(&value);
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}
