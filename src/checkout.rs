use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::process::Command;

const CM: &str = "cm";

/// Plastic SCM workspace brought up to date before parsing
pub struct PlasticCheckout {
    workspace: PathBuf,
    branch: String,
}

impl PlasticCheckout {
    pub fn new(workspace: impl Into<PathBuf>, branch: &str) -> Self {
        Self {
            workspace: workspace.into(),
            branch: branch.to_string(),
        }
    }

    /// Switch to the configured branch and update the workspace
    pub async fn update(&self) -> Result<PathBuf> {
        tracing::info!(
            "Updating Plastic workspace {} to branch {}",
            self.workspace.display(),
            self.branch
        );

        self.run(&self.switch_args()).await?;
        self.run(&["update".to_string()]).await?;

        Ok(self.workspace.clone())
    }

    fn switch_args(&self) -> Vec<String> {
        vec!["switch".to_string(), self.branch.clone()]
    }

    async fn run(&self, args: &[String]) -> Result<()> {
        let status = Command::new(CM)
            .args(args)
            .current_dir(&self.workspace)
            .status()
            .await
            .with_context(|| format!("Failed to spawn `{} {}`", CM, args.join(" ")))?;

        if !status.success() {
            anyhow::bail!("`{} {}` failed with {}", CM, args.join(" "), status);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_args() {
        let checkout = PlasticCheckout::new("/repo", "main");
        assert_eq!(checkout.switch_args(), vec!["switch", "main"]);
    }

    #[tokio::test]
    async fn test_missing_workspace_fails() {
        let checkout = PlasticCheckout::new("/nonexistent/workspace", "main");
        assert!(checkout.update().await.is_err());
    }
}
