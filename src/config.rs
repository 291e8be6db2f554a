//! Settings for sampling a Data API collection
//!
//! Every setting is resolved with the same precedence: command-line flag,
//! then process environment, then the app's `.env.local` file, then a
//! built-in default. Empty values count as unset.

use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

/// Env file looked up in the app root
pub const ENV_FILE_NAME: &str = ".env.local";

pub const ENV_TOKEN: &str = "CORVA_BEARER_TOKEN";
pub const ENV_BASE_URL: &str = "CORVA_DATA_API_BASE_URL";
pub const ENV_PROVIDER: &str = "CORVA_PROVIDER";
pub const ENV_COLLECTION: &str = "CORVA_COLLECTION";
pub const ENV_ASSET_ID: &str = "CORVA_ASSET_ID";
pub const ENV_LIMIT: &str = "CORVA_LIMIT";

pub const DEFAULT_PROVIDER: &str = "corva";
pub const DEFAULT_QUERY_FIELD: &str = "asset_id";
pub const DEFAULT_SORT_JSON: &str = r#"{"timestamp":-1}"#;
pub const DEFAULT_LIMIT: &str = "10";

// ============================================================================
// Environment Source
// ============================================================================

/// Layered view over the process environment and an env file
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    process: HashMap<String, String>,
    file: HashMap<String, String>,
}

impl EnvSource {
    /// Build a source from explicit maps
    pub fn new(process: HashMap<String, String>, file: HashMap<String, String>) -> Self {
        Self { process, file }
    }

    /// Capture the process environment and the app root's `.env.local`
    pub fn load(app_root: &Path) -> Result<Self> {
        let file = load_env_file(&app_root.join(ENV_FILE_NAME))?;
        Ok(Self::new(std::env::vars().collect(), file))
    }

    /// Look up a key, process environment first
    pub fn get(&self, key: &str) -> Option<&str> {
        non_empty(self.process.get(key).map(String::as_str))
            .or_else(|| non_empty(self.file.get(key).map(String::as_str)))
    }
}

/// Read `KEY=value` pairs from an env file
///
/// A missing file yields an empty map. Values are taken literally: one pair
/// of surrounding quotes is removed, but `$VAR`, backslash escapes and
/// ` # ...` tails are kept as written. Lines that cannot be parsed are
/// skipped. The process environment is left untouched.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    if !path.exists() {
        debug!("No env file at {}", path.display());
        return Ok(vars);
    }

    let text = std::fs::read_to_string(path).map_err(|e| Error::EnvFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let literal = literal_env_lines(&text);

    for item in dotenvy::from_read_iter(literal.as_bytes()) {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(e) => warn!("Skipping line in {}: {e}", path.display()),
        }
    }

    debug!("Loaded {} entries from {}", vars.len(), path.display());
    Ok(vars)
}

/// Re-quote every assignment so dotenvy reads the value verbatim
///
/// Each value is unquoted once, then wrapped in double quotes with `\`, `"`
/// and `$` escaped. Comments, blank lines, lines without `=` and keys dotenvy
/// cannot name are dropped here.
fn literal_env_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for line in text.trim_start_matches('\u{feff}').lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            debug!("Skipping env line without '='");
            continue;
        };
        let key = key.trim();
        if !is_env_key(key) {
            warn!("Skipping env entry with invalid key {key:?}");
            continue;
        }

        out.push_str(key);
        out.push_str("=\"");
        for c in unquote(value.trim()).chars() {
            if matches!(c, '\\' | '"' | '$') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push_str("\"\n");
    }

    out
}

fn is_env_key(key: &str) -> bool {
    key.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .unwrap_or(value)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// Sample Options
// ============================================================================

/// Raw options for the `sample` command
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SampleOptions {
    /// App root directory containing .env.local (default: current directory)
    #[arg(long)]
    pub app_root: Option<PathBuf>,

    /// Bearer token (overrides env and .env.local)
    #[arg(long)]
    pub token: Option<String>,

    /// Data API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Provider (default: corva)
    #[arg(long)]
    pub provider: Option<String>,

    /// Collection name
    #[arg(long)]
    pub collection: Option<String>,

    /// Asset id (required unless --query-json is used)
    #[arg(long)]
    pub asset_id: Option<String>,

    /// Query key for the asset id (default: asset_id)
    #[arg(long)]
    pub query_field: Option<String>,

    /// Full query override JSON
    #[arg(long)]
    pub query_json: Option<String>,

    /// Sort JSON (default: {"timestamp":-1})
    #[arg(long)]
    pub sort_json: Option<String>,

    /// Maximum number of records to fetch (default: 10)
    #[arg(long)]
    pub limit: Option<String>,

    /// Optional fields selector (comma-separated)
    #[arg(long)]
    pub fields: Option<String>,
}

impl SampleOptions {
    /// App root, defaulting to the current directory
    pub fn app_root(&self) -> Result<PathBuf> {
        match &self.app_root {
            Some(root) => Ok(root.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Resolve the options against an environment into a request
    pub fn resolve(&self, env: &EnvSource) -> Result<SampleRequest> {
        let pick = |flag: &Option<String>, key: Option<&str>| -> Option<String> {
            non_empty(flag.as_deref())
                .or_else(|| key.and_then(|k| env.get(k)))
                .map(str::to_string)
        };

        let token = pick(&self.token, Some(ENV_TOKEN)).ok_or_else(|| {
            Error::missing_setting(
                "bearer token",
                format!("Pass --token or set {ENV_TOKEN} in {ENV_FILE_NAME}."),
            )
        })?;
        let base_url = pick(&self.base_url, Some(ENV_BASE_URL)).ok_or_else(|| {
            Error::missing_setting(
                "base URL",
                format!("Pass --base-url or set {ENV_BASE_URL}."),
            )
        })?;
        url::Url::parse(&base_url).map_err(|e| {
            Error::invalid_setting("--base-url", format!("an absolute URL ({e})."))
        })?;
        let provider = pick(&self.provider, Some(ENV_PROVIDER))
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let collection = pick(&self.collection, Some(ENV_COLLECTION)).ok_or_else(|| {
            Error::missing_setting(
                "collection",
                format!("Pass --collection or set {ENV_COLLECTION}."),
            )
        })?;
        let asset_id = pick(&self.asset_id, Some(ENV_ASSET_ID));

        let query_field =
            pick(&self.query_field, None).unwrap_or_else(|| DEFAULT_QUERY_FIELD.to_string());
        let sort_json = pick(&self.sort_json, None).unwrap_or_else(|| DEFAULT_SORT_JSON.to_string());
        let limit_raw = pick(&self.limit, Some(ENV_LIMIT)).unwrap_or_else(|| DEFAULT_LIMIT.to_string());
        let fields = pick(&self.fields, None);

        let limit = parse_limit(&limit_raw)?;

        let query = match non_empty(self.query_json.as_deref()) {
            Some(raw) => parse_setting_json("--query-json", raw)?,
            None => {
                let asset_id = asset_id.ok_or_else(|| {
                    Error::missing_setting("asset id", "Pass --asset-id or use --query-json.")
                })?;
                let mut query = serde_json::Map::new();
                query.insert(query_field, parse_maybe_number(&asset_id));
                Value::Object(query)
            }
        };

        let sort = parse_setting_json("--sort-json", &sort_json)?;
        let endpoint = build_endpoint(&base_url, &provider, &collection);

        Ok(SampleRequest {
            token,
            endpoint,
            provider,
            collection,
            limit,
            query,
            sort,
            fields,
        })
    }
}

// ============================================================================
// Resolved Request
// ============================================================================

/// Fully resolved sample request
#[derive(Clone, PartialEq)]
pub struct SampleRequest {
    /// Bearer token
    pub token: String,
    /// Collection endpoint URL
    pub endpoint: String,
    pub provider: String,
    pub collection: String,
    /// Maximum number of records
    pub limit: u64,
    /// Query document
    pub query: Value,
    /// Sort document
    pub sort: Value,
    /// Optional fields selector
    pub fields: Option<String>,
}

impl std::fmt::Debug for SampleRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleRequest")
            .field("endpoint", &self.endpoint)
            .field("provider", &self.provider)
            .field("collection", &self.collection)
            .field("limit", &self.limit)
            .field("query", &self.query)
            .field("sort", &self.sort)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Collection endpoint for a provider
pub fn build_endpoint(base_url: &str, provider: &str, collection: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/api/v1/data/{provider}/{collection}/")
}

/// Any numeric literal with a positive whole value is a limit (`10`, `10.0`, `1e1`, `0x0a`)
fn parse_limit(raw: &str) -> Result<u64> {
    let invalid = || Error::invalid_setting("--limit", "a positive integer.");
    let raw = raw.trim();

    let radix = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| raw.strip_prefix(prefix).map(|digits| (digits, radix)));
    if let Some((digits, radix)) = radix {
        return match u64::from_str_radix(digits, radix) {
            Ok(limit) if limit > 0 && !digits.starts_with('+') => Ok(limit),
            _ => Err(invalid()),
        };
    }

    // f64 parsing also accepts `inf` and `nan`, which fail the checks below
    let value: f64 = raw.parse().map_err(|_| invalid())?;
    if value.is_finite() && value.fract() == 0.0 && value > 0.0 && value < u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(invalid())
    }
}

fn parse_setting_json(field: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|source| Error::InvalidSettingJson {
        field: field.to_string(),
        source,
    })
}

/// Integer-looking ids (`-?\d+`) become JSON numbers, anything else stays a string
///
/// Ids beyond the 64-bit range are sent as the nearest float.
fn parse_maybe_number(raw: &str) -> Value {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Value::String(raw.to_string());
    }

    if let Ok(n) = raw.parse::<i64>() {
        return json!(n);
    }
    if let Ok(n) = raw.parse::<u64>() {
        return json!(n);
    }
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| Value::String(raw.to_string()), Value::Number)
}
