use std::{env, fmt, path::PathBuf};

use super::{non_empty_var, parse_name_list, DEFAULT_COURSE_NAME};

/// Application runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }

    /// Returns `true` when the current environment should behave as development.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Returns the canonical name used for logging labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Where the form document served to the page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSource {
    /// JSON form definition on disk.
    File(PathBuf),
    /// Built-in course attendance form.
    Builtin {
        course_name: String,
        course_semester: String,
        students: Vec<String>,
    },
}

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub form_source: FormSource,
}

impl AppConfig {
    /// Constructs the configuration by reading and validating environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_value = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let environment = Environment::from_str(&env_value)?;

        let form_source = match env::var("ATTENDANCE_FORM_PATH") {
            Ok(path) if path.trim().is_empty() => return Err(ConfigError::EmptyFormPath),
            Ok(path) => FormSource::File(PathBuf::from(path.trim())),
            Err(_) => FormSource::Builtin {
                course_name: non_empty_var("ATTENDANCE_COURSE_NAME")
                    .unwrap_or_else(|| DEFAULT_COURSE_NAME.to_string()),
                course_semester: non_empty_var("ATTENDANCE_COURSE_SEMESTER").unwrap_or_default(),
                students: non_empty_var("ATTENDANCE_STUDENTS")
                    .map(|raw| parse_name_list(&raw))
                    .unwrap_or_default(),
            },
        };

        Ok(Self {
            environment,
            form_source,
        })
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment(String),
    EmptyFormPath,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnvironment(value) => write!(
                f,
                "APP_ENV must be one of 'development', 'production', or 'test' (got {value})"
            ),
            Self::EmptyFormPath => write!(f, "ATTENDANCE_FORM_PATH is set but empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{LazyLock, Mutex};

    static ENV_GUARD: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

    const KEYS: [&str; 5] = [
        "APP_ENV",
        "ATTENDANCE_FORM_PATH",
        "ATTENDANCE_COURSE_NAME",
        "ATTENDANCE_COURSE_SEMESTER",
        "ATTENDANCE_STUDENTS",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_in_development() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();

        let config = AppConfig::from_env().expect("config should load with defaults");
        assert_eq!(config.environment, Environment::Development);
        assert!(config.environment.is_development());
        assert_eq!(
            config.form_source,
            FormSource::Builtin {
                course_name: DEFAULT_COURSE_NAME.to_string(),
                course_semester: String::new(),
                students: Vec::new(),
            }
        );
    }

    #[test]
    fn rejects_invalid_environment() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("APP_ENV", "invalid");

        let err = AppConfig::from_env().expect_err("invalid env should error");
        assert!(matches!(err, ConfigError::InvalidEnvironment(value) if value == "invalid"));

        clear_env();
    }

    #[test]
    fn reads_builtin_form_settings() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("ATTENDANCE_COURSE_NAME", "Algebra I");
        env::set_var("ATTENDANCE_COURSE_SEMESTER", "Fall 2024");
        env::set_var("ATTENDANCE_STUDENTS", "alice, bob");

        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(
            config.form_source,
            FormSource::Builtin {
                course_name: "Algebra I".to_string(),
                course_semester: "Fall 2024".to_string(),
                students: vec!["alice".to_string(), "bob".to_string()],
            }
        );

        clear_env();
    }

    #[test]
    fn form_path_takes_precedence_over_builtin() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("ATTENDANCE_FORM_PATH", "forms/attendance.json");
        env::set_var("ATTENDANCE_COURSE_NAME", "ignored");

        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(
            config.form_source,
            FormSource::File(PathBuf::from("forms/attendance.json"))
        );

        clear_env();
    }

    #[test]
    fn rejects_blank_form_path() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("ATTENDANCE_FORM_PATH", "  ");

        let err = AppConfig::from_env().expect_err("blank path should error");
        assert!(matches!(err, ConfigError::EmptyFormPath));

        clear_env();
    }
}
