//! Client configuration from the environment.
//!
//! | Variable               | Default                  |
//! |------------------------|--------------------------|
//! | `LIVEQUIZ_PAGE_URL`    | `http://localhost:8000/` |
//! | `LIVEQUIZ_ROLE`        | `player`                 |
//! | `LIVEQUIZ_QUIZ_CODE`   | required                 |
//! | `LIVEQUIZ_PATH_PREFIX` | `/ws`                    |

use crate::infrastructure::location::{LocationError, PageLocation};

pub const PAGE_URL_VAR: &str = "LIVEQUIZ_PAGE_URL";
pub const ROLE_VAR: &str = "LIVEQUIZ_ROLE";
pub const QUIZ_CODE_VAR: &str = "LIVEQUIZ_QUIZ_CODE";
pub const PATH_PREFIX_VAR: &str = "LIVEQUIZ_PATH_PREFIX";

const DEFAULT_PAGE_URL: &str = "http://localhost:8000/";
const DEFAULT_PATH_PREFIX: &str = "/ws";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Unknown role `{0}` (expected `host` or `player`)")]
    InvalidRole(String),

    #[error("Invalid quiz code `{0}`")]
    InvalidQuizCode(String),

    #[error(transparent)]
    Location(#[from] LocationError),
}

/// Which side of the quiz this client plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Player,
}

impl Role {
    /// Path segment of the role's realtime endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            Role::Host => "host",
            Role::Player => "play",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" => Ok(Role::Host),
            "player" | "play" => Ok(Role::Player),
            _ => Err(ConfigError::InvalidRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub location: PageLocation,
    pub role: Role,
    pub quiz_code: String,
    pub path_prefix: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let location =
            PageLocation::parse(&get(PAGE_URL_VAR).unwrap_or_else(|| DEFAULT_PAGE_URL.into()))?;

        let role = match get(ROLE_VAR) {
            Some(raw) => raw.parse()?,
            None => Role::Player,
        };

        let quiz_code = get(QUIZ_CODE_VAR).ok_or(ConfigError::MissingVar(QUIZ_CODE_VAR))?;
        if !quiz_code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::InvalidQuizCode(quiz_code));
        }

        let path_prefix = get(PATH_PREFIX_VAR)
            .unwrap_or_else(|| DEFAULT_PATH_PREFIX.into())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            location,
            role,
            quiz_code,
            path_prefix,
        })
    }

    /// Root-relative realtime endpoint, e.g. `/ws/live/play/ABC`.
    pub fn endpoint(&self) -> String {
        let prefix = self.path_prefix.trim_start_matches('/');
        let live = format!("live/{}/{}", self.role.path_segment(), self.quiz_code);
        if prefix.is_empty() {
            format!("/{live}")
        } else {
            format!("/{prefix}/{live}")
        }
    }
}
