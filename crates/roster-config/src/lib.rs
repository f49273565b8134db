use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use lettre::message::Mailbox;
use roster_core::rules::{ExportFormat, FileNaming, DEFAULT_PLACEHOLDER};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "roster";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_OUTPUT_DIR: &str = "exports";
pub const DEFAULT_PASSWORD_ENV: &str = "ROSTER_SMTP_PASSWORD";
pub const DEFAULT_SUBJECT_PREFIX: &str = "Inscripció d'equip";

pub const ENV_SMTP_HOST: &str = "ROSTER_SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "ROSTER_SMTP_PORT";
pub const ENV_SMTP_USER: &str = "ROSTER_SMTP_USER";
pub const ENV_MAIL_FROM: &str = "ROSTER_MAIL_FROM";
pub const ENV_MAIL_TO: &str = "ROSTER_MAIL_TO";
pub const ENV_LOGO_PATH: &str = "ROSTER_LOGO_PATH";
pub const ENV_OUTPUT_DIR: &str = "ROSTER_OUTPUT_DIR";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub placeholder: String,
    pub export: ExportConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub formats: Vec<ExportFormat>,
    pub naming: FileNaming,
    pub legacy_log: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub tls: EmailTls,
    pub username: Option<String>,
    pub password: Option<Secret>,
    pub from: Option<String>,
    pub to: Vec<String>,
    pub subject_prefix: String,
    pub timeout_seconds: Option<u64>,
    pub logo: Option<PathBuf>,
}

impl EmailConfig {
    /// Username and password, only when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_ref()) {
            (Some(username), Some(password)) => Some((username, password.expose())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailTls {
    Tls,
    StartTls,
    None,
}

/// A credential that never shows up in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            export: ExportConfig {
                output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
                formats: vec![ExportFormat::Workbook],
                naming: FileNaming::SlugFirst,
                legacy_log: None,
            },
            email: EmailConfig {
                enabled: true,
                smtp_host: None,
                smtp_port: None,
                tls: EmailTls::StartTls,
                username: None,
                password: None,
                from: None,
                to: Vec::new(),
                subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
                timeout_seconds: None,
                logo: None,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("placeholder must not be empty")]
    EmptyPlaceholder,
    #[error("export.formats must list at least one format")]
    NoExportFormats,
    #[error("invalid email.{field}: {reason}")]
    InvalidEmailField { field: &'static str, reason: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    placeholder: Option<String>,
    export: Option<ExportFile>,
    email: Option<EmailFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExportFile {
    output_dir: Option<PathBuf>,
    formats: Option<Vec<ExportFormat>>,
    naming: Option<FileNaming>,
    legacy_log: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EmailFile {
    enabled: Option<bool>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    tls: Option<EmailTls>,
    username: Option<String>,
    password_env: Option<String>,
    from: Option<String>,
    to: Option<Vec<String>>,
    subject_prefix: Option<String>,
    timeout_seconds: Option<u64>,
    logo: Option<PathBuf>,
}

/// Loads the config file (if any) and applies environment overrides.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    load_with_env(config_path, |key| env::var(key).ok())
}

pub fn load_with_env(
    config_path: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig> {
    let required = config_path.is_some();
    let parsed = match resolve_config_path(config_path) {
        Ok(path) => read_config_file(&path, required)?.unwrap_or_default(),
        Err(ConfigError::MissingHomeDir) if !required => ConfigFile::default(),
        Err(ConfigError::InvalidConfigPath(_)) if !required => ConfigFile::default(),
        Err(err) => return Err(err),
    };
    merge_config(parsed, &lookup)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn read_config_file(path: &Path, required: bool) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parsed))
}

fn merge_config(parsed: ConfigFile, lookup: &dyn Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(placeholder) = parsed.placeholder {
        if placeholder.trim().is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }
        config.placeholder = placeholder;
    }

    if let Some(export) = parsed.export {
        if let Some(dir) = export.output_dir {
            config.export.output_dir = dir;
        }
        if let Some(formats) = export.formats {
            if formats.is_empty() {
                return Err(ConfigError::NoExportFormats);
            }
            let mut unique = Vec::with_capacity(formats.len());
            for format in formats {
                if !unique.contains(&format) {
                    unique.push(format);
                }
            }
            config.export.formats = unique;
        }
        if let Some(naming) = export.naming {
            config.export.naming = naming;
        }
        config.export.legacy_log = export.legacy_log;
    }

    let email = parsed.email.unwrap_or_default();
    if let Some(enabled) = email.enabled {
        config.email.enabled = enabled;
    }
    config.email.smtp_host = email.smtp_host;
    config.email.smtp_port = email.smtp_port;
    if let Some(tls) = email.tls {
        config.email.tls = tls;
    }
    config.email.username = email.username;
    config.email.from = email.from;
    if let Some(to) = email.to {
        config.email.to = to;
    }
    if let Some(prefix) = email.subject_prefix {
        config.email.subject_prefix = prefix;
    }
    config.email.timeout_seconds = email.timeout_seconds;
    config.email.logo = email.logo;

    apply_env(&mut config, lookup)?;

    let password_env = email
        .password_env
        .as_deref()
        .unwrap_or(DEFAULT_PASSWORD_ENV);
    config.email.password = non_empty(lookup(password_env)).map(Secret::new);

    validate_email(&config.email)?;
    Ok(config)
}

fn apply_env(config: &mut AppConfig, lookup: &dyn Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(host) = non_empty(lookup(ENV_SMTP_HOST)) {
        config.email.smtp_host = Some(host);
    }
    if let Some(port) = non_empty(lookup(ENV_SMTP_PORT)) {
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidEmailField {
                field: "smtp_port",
                reason: format!("{ENV_SMTP_PORT} is not a port number: {port}"),
            })?;
        config.email.smtp_port = Some(port);
    }
    if let Some(user) = non_empty(lookup(ENV_SMTP_USER)) {
        config.email.username = Some(user);
    }
    if let Some(from) = non_empty(lookup(ENV_MAIL_FROM)) {
        config.email.from = Some(from);
    }
    if let Some(to) = non_empty(lookup(ENV_MAIL_TO)) {
        config.email.to = to
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(logo) = non_empty(lookup(ENV_LOGO_PATH)) {
        config.email.logo = Some(PathBuf::from(logo));
    }
    if let Some(dir) = non_empty(lookup(ENV_OUTPUT_DIR)) {
        config.export.output_dir = PathBuf::from(dir);
    }
    Ok(())
}

fn validate_email(email: &EmailConfig) -> Result<()> {
    if let Some(host) = email.smtp_host.as_deref() {
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidEmailField {
                field: "smtp_host",
                reason: "must not be empty".to_string(),
            });
        }
    }
    if email.smtp_port == Some(0) {
        return Err(ConfigError::InvalidEmailField {
            field: "smtp_port",
            reason: "must be between 1 and 65535".to_string(),
        });
    }
    if email.timeout_seconds == Some(0) {
        return Err(ConfigError::InvalidEmailField {
            field: "timeout_seconds",
            reason: "must be positive".to_string(),
        });
    }
    if let Some(from) = email.from.as_deref() {
        from.parse::<Mailbox>()
            .map_err(|err| ConfigError::InvalidEmailField {
                field: "from",
                reason: format!("{from}: {err}"),
            })?;
    }
    for to in &email.to {
        to.parse::<Mailbox>()
            .map_err(|err| ConfigError::InvalidEmailField {
                field: "to",
                reason: format!("{to}: {err}"),
            })?;
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
