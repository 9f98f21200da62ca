// Process-scoped configuration. Parsed once in `main` and passed by
// reference to everything that needs it; every flag can also be supplied
// through an environment variable so the menu can be pointed at another
// compose project without editing anything.

use clap::Parser;
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::readiness::ReadinessPolicy;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "stack-menu",
    about = "Interactive docker compose menu for the Spring AI + Ollama stack",
    version
)]
pub struct Config {
    /// Directory holding the compose file; every docker command runs here
    #[arg(long, env = "STACK_PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Secrets file consumed by the containers, relative to the project dir
    #[arg(long, env = "STACK_ENV_FILE", default_value = ".env")]
    pub env_file: PathBuf,

    /// URL opened in the browser once the stack is up
    #[arg(long, env = "STACK_FRONTEND_URL", default_value = "http://localhost")]
    pub frontend_url: Url,

    /// Chat endpoint hit by the API test
    #[arg(
        long,
        env = "STACK_API_URL",
        default_value = "http://localhost:9292/openai/api/chat"
    )]
    pub api_url: Url,

    /// Message sent to the chat endpoint by the API test
    #[arg(long, env = "STACK_API_MESSAGE", default_value = "Hello")]
    pub api_message: String,

    /// Request timeout for the API test (model replies can be slow)
    #[arg(long, env = "STACK_API_TIMEOUT_SECS", default_value_t = 120)]
    pub api_timeout_secs: u64,

    /// Container whose run state signals that the stack is ready
    #[arg(long, env = "STACK_FRONTEND_CONTAINER", default_value = "spring-ai-frontend")]
    pub frontend_container: String,

    /// Container running the Ollama server
    #[arg(long, env = "STACK_OLLAMA_CONTAINER", default_value = "ollama")]
    pub ollama_container: String,

    /// Model pulled and run by the interactive model session
    #[arg(long, env = "STACK_MODEL", default_value = "tinyllama")]
    pub model: String,

    /// Compose service name of the backend app
    #[arg(long, default_value = "spring-ai-app")]
    pub app_service: String,

    /// Compose service name of the Ollama server
    #[arg(long, default_value = "ollama")]
    pub ollama_service: String,

    /// Compose service name of the frontend
    #[arg(long, default_value = "frontend")]
    pub frontend_service: String,

    /// Seconds between readiness checks after starting the stack
    #[arg(
        long,
        env = "STACK_POLL_INTERVAL_SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_secs: u64,

    /// Give up waiting for readiness after this many seconds
    #[arg(long, env = "STACK_READY_TIMEOUT_SECS", default_value_t = 60)]
    pub ready_timeout_secs: u64,

    /// Pause before opening the browser once the stack is ready
    #[arg(long, default_value_t = 2)]
    pub open_delay_secs: u64,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Absolute-or-project-relative location of the env file.
    pub fn env_file_path(&self) -> PathBuf {
        resolve(&self.project_dir, &self.env_file)
    }

    pub fn readiness_policy(&self) -> ReadinessPolicy {
        ReadinessPolicy {
            container: self.frontend_container.clone(),
            interval: Duration::from_secs(self.poll_interval_secs),
            timeout: Duration::from_secs(self.ready_timeout_secs),
            open_delay: Duration::from_secs(self.open_delay_secs),
        }
    }

    /// Full URL of the API test request, message included as a query
    /// parameter.
    pub fn api_test_url(&self) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("message", &self.api_message);
        url
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Config {
        Config::try_parse_from(["stack-menu"]).unwrap()
    }

    #[test]
    fn defaults_match_the_compose_stack() {
        let config = defaults();
        assert_eq!(config.frontend_container, "spring-ai-frontend");
        assert_eq!(config.model, "tinyllama");
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.ready_timeout_secs, 60);
        assert_eq!(config.open_delay_secs, 2);
        assert_eq!(config.frontend_url.as_str(), "http://localhost/");
    }

    #[test]
    fn api_test_url_carries_the_message() {
        let config =
            Config::try_parse_from(["stack-menu", "--api-message", "hi there"]).unwrap();
        assert_eq!(
            config.api_test_url().as_str(),
            "http://localhost:9292/openai/api/chat?message=hi+there"
        );
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        assert!(Config::try_parse_from(["stack-menu", "--poll-interval-secs", "0"]).is_err());
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(Config::try_parse_from(["stack-menu", "--frontend-url", "not a url"]).is_err());
    }

    #[test]
    fn env_file_is_resolved_against_project_dir() {
        let config =
            Config::try_parse_from(["stack-menu", "--project-dir", "/srv/stack"]).unwrap();
        assert_eq!(config.env_file_path(), PathBuf::from("/srv/stack/.env"));

        let config = Config::try_parse_from([
            "stack-menu",
            "--project-dir",
            "/srv/stack",
            "--env-file",
            "/etc/stack.env",
        ])
        .unwrap();
        assert_eq!(config.env_file_path(), PathBuf::from("/etc/stack.env"));
    }

    #[test]
    fn readiness_policy_uses_configured_durations() {
        let policy = defaults().readiness_policy();
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert_eq!(policy.timeout, Duration::from_secs(60));
        assert_eq!(policy.open_delay, Duration::from_secs(2));
        assert_eq!(policy.container, "spring-ai-frontend");
    }
}
