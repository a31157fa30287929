use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Upstream request failed: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("Upstream responded with status {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Invalid upstream URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProxyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProxyError::UpstreamRequest(_) | ProxyError::UpstreamStatus { .. } => {
                ErrorCategory::Upstream
            }
            ProxyError::UrlError(_)
            | ProxyError::ConfigError { .. }
            | ProxyError::ConfigValidationError { .. }
            | ProxyError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ProxyError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProxyError::UpstreamStatus { status, .. } if *status < 500 => ErrorSeverity::Low,
            ProxyError::UpstreamStatus { .. } | ProxyError::UpstreamRequest(_) => {
                ErrorSeverity::Medium
            }
            ProxyError::UrlError(_)
            | ProxyError::ConfigError { .. }
            | ProxyError::ConfigValidationError { .. }
            | ProxyError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ProxyError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProxyError::UpstreamRequest(e) if e.is_timeout() => {
                "The upstream API did not answer in time".to_string()
            }
            ProxyError::UpstreamRequest(_) => "Could not reach the upstream API".to_string(),
            ProxyError::UpstreamStatus { status, .. } => {
                format!("The upstream API rejected the request (HTTP {})", status)
            }
            ProxyError::UrlError(e) => format!("The upstream URL is not valid: {}", e),
            ProxyError::IoError(e) => format!("A file or socket operation failed: {}", e),
            ProxyError::ConfigError { message } => format!("Configuration problem: {}", message),
            ProxyError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            ProxyError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Upstream => {
                "Check that API_BASE_URL points at a reachable upstream and try again later"
            }
            ErrorCategory::Configuration => {
                "Review the config file, CLI flags and API_BASE_URL, then restart"
            }
            ErrorCategory::System => "Check the bind address, file permissions and free ports",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
