use anyhow::Result;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Owner,
    Repo,
    AccessToken,
    ApiBaseUrl,
    ScriptsDir,
    ScriptExtension,
    TemplateFile,
    StateFile,
}

impl ConfigKey {
    /// Environment variable name the key is read from.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Owner => "repo_owner",
            ConfigKey::Repo => "repo_name",
            ConfigKey::AccessToken => "access_token",
            ConfigKey::ApiBaseUrl => "api_base_url",
            ConfigKey::ScriptsDir => "scripts_dir",
            ConfigKey::ScriptExtension => "script_extension",
            ConfigKey::TemplateFile => "issue_template",
            ConfigKey::StateFile => "state_file",
        }
    }

    /// Value used when the variable is unset. Required keys have none.
    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            ConfigKey::Owner | ConfigKey::Repo | ConfigKey::AccessToken => None,
            ConfigKey::ApiBaseUrl => Some(DEFAULT_API_BASE_URL),
            ConfigKey::ScriptsDir => Some(DEFAULT_SCRIPTS_DIR),
            ConfigKey::ScriptExtension => Some(DEFAULT_SCRIPT_EXTENSION),
            ConfigKey::TemplateFile => Some(DEFAULT_TEMPLATE_FILE),
            ConfigKey::StateFile => Some(DEFAULT_STATE_FILE),
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::Owner,
            ConfigKey::Repo,
            ConfigKey::AccessToken,
            ConfigKey::ApiBaseUrl,
            ConfigKey::ScriptsDir,
            ConfigKey::ScriptExtension,
            ConfigKey::TemplateFile,
            ConfigKey::StateFile,
        ]
    }
}

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
/// Repository directory the scripts are listed from.
pub const DEFAULT_SCRIPTS_DIR: &str = "scripts/english";
pub const DEFAULT_SCRIPT_EXTENSION: &str = ".md";
pub const DEFAULT_TEMPLATE_FILE: &str = "issue_template.txt";
pub const DEFAULT_STATE_FILE: &str = "state.txt";

/// Everything a run needs, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub access_token: String,
    pub api_base_url: String,
    pub scripts_dir: String,
    pub script_extension: String,
    pub template_file: String,
    pub state_file: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a local `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// - Required keys (owner, repo, access token) only need to be present;
    ///   their contents are not validated.
    /// - Optional keys fall back to their defaults when absent.
    /// - Returns an `Err` naming every missing required variable.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut get = |key: ConfigKey| -> String {
            match lookup(key.as_str()) {
                Some(value) => value,
                None => match key.default_value() {
                    Some(default) => default.to_string(),
                    None => {
                        missing.push(key.as_str());
                        String::new()
                    }
                },
            }
        };

        let config = Config {
            owner: get(ConfigKey::Owner),
            repo: get(ConfigKey::Repo),
            access_token: get(ConfigKey::AccessToken),
            api_base_url: get(ConfigKey::ApiBaseUrl),
            scripts_dir: get(ConfigKey::ScriptsDir),
            script_extension: get(ConfigKey::ScriptExtension),
            template_file: get(ConfigKey::TemplateFile),
            state_file: get(ConfigKey::StateFile),
        };

        if !missing.is_empty() {
            return Err(anyhow::anyhow!(
                "Missing required environment variables: {}",
                missing.join(", ")
            ));
        }
        Ok(config)
    }
}
