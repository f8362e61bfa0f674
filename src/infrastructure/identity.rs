use crate::domain::identity::{IdentityError, IdentityResolver};
use crate::infrastructure::config::IdentityConfig;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

#[derive(Deserialize)]
struct ShowUserOutput {
    user: IamUser,
}

#[derive(Deserialize)]
struct IamUser {
    name: String,
}

/// Resolves IAM users with `cloud IAM ShowUser`.
#[derive(Debug, Clone)]
pub struct CliIdentityResolver {
    program: String,
}

impl CliIdentityResolver {
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            program: config.program.clone(),
        }
    }
}

#[async_trait]
impl IdentityResolver for CliIdentityResolver {
    #[tracing::instrument(skip(self), fields(program = %self.program))]
    async fn resolve(&self, user_id: &str) -> Result<String, IdentityError> {
        let output = Command::new(&self.program)
            .arg("IAM")
            .arg("ShowUser")
            .arg(format!("--user_id={user_id}"))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(IdentityError::Unavailable)?;

        if !output.status.success() {
            return Err(IdentityError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_username(&output.stdout)
    }
}

/// Extracts `user.name` from the CLI's JSON output.
pub fn parse_username(stdout: &[u8]) -> Result<String, IdentityError> {
    let parsed: ShowUserOutput =
        serde_json::from_slice(stdout).map_err(|_| IdentityError::NotFound)?;

    if parsed.user.name.trim().is_empty() {
        return Err(IdentityError::NotFound);
    }

    Ok(parsed.user.name)
}
