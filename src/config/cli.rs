use super::{Settings, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "study-portal")]
#[command(about = "Browse and compare colleges from the study-abroad backend")]
pub struct CliConfig {
    #[arg(long, global = true, env = "STUDY_PORTAL_BACKEND_URL")]
    pub backend_url: Option<String>,

    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "STUDY_PORTAL_ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,

    #[arg(
        long,
        global = true,
        env = "STUDY_PORTAL_ADMIN_USER",
        help = "Admin user as JSON, e.g. {\"id\":\"1\",\"username\":\"admin\"}"
    )]
    pub admin_user: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List colleges, optionally filtered by name or country
    Colleges {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one college; without --tab every tab is printed
    College {
        id: String,
        #[arg(long, help = "intro, course_fees, admission_eligibility, benefits or campus_info")]
        tab: Option<String>,
    },
    /// Compare two or three colleges side by side
    Compare {
        #[arg(required = true, num_args = 1..=3)]
        ids: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List study destinations
    Countries,
    /// Show one study destination
    Country { id: String },
    /// List blog posts
    Blogs,
    /// Show one blog post
    Blog { id: String },
    /// Submit the "interested" form
    Interest {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        college: Option<String>,
    },
    /// Admin console (requires an admin session)
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AdminCommand {
    /// List customers who submitted the interest form
    Customers {
        #[arg(long)]
        search: Option<String>,
    },
    DeleteCollege { id: String },
    DeleteCountry { id: String },
    DeleteBlog { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl CliConfig {
    /// 讀取 `--config`（若有）再疊上旗標與環境變數
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => TomlConfig::default(),
        };

        let settings = Settings::from_toml(&file)
            .with_backend_url(self.backend_url.clone())
            .with_admin_token(self.admin_token.clone())
            .with_admin_user(self.admin_user.clone());
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_compare_command() {
        let config = CliConfig::try_parse_from([
            "study-portal",
            "compare",
            "harvard",
            "oxford",
            "--format",
            "csv",
            "--backend-url",
            "http://127.0.0.1:3000",
        ])
        .unwrap();

        match config.command {
            Command::Compare { ids, format } => {
                assert_eq!(ids, vec!["harvard", "oxford"]);
                assert_eq!(format, OutputFormat::Csv);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(config.backend_url.as_deref(), Some("http://127.0.0.1:3000"));
    }

    #[test]
    fn test_compare_accepts_at_most_three() {
        let result =
            CliConfig::try_parse_from(["study-portal", "compare", "a", "b", "c", "d"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_admin_subcommand() {
        let config =
            CliConfig::try_parse_from(["study-portal", "admin", "delete-blog", "b1"]).unwrap();
        assert!(matches!(
            config.command,
            Command::Admin {
                command: AdminCommand::DeleteBlog { .. }
            }
        ));
    }

    #[test]
    fn test_settings_from_file_and_flags() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[backend]
base_url = "https://from-file.example.com"
timeout_seconds = 5
"#,
            )
            .unwrap();

        let path = temp_file.path().to_string_lossy().to_string();
        let config = CliConfig::try_parse_from([
            "study-portal",
            "--config",
            path.as_str(),
            "--backend-url",
            "http://127.0.0.1:4000",
            "blogs",
        ])
        .unwrap();

        let settings = config.settings().unwrap();
        assert_eq!(settings.backend_url, "http://127.0.0.1:4000");
        assert_eq!(settings.timeout, Some(std::time::Duration::from_secs(5)));
    }
}
