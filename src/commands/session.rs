use anyhow::{Context, Result, bail};
use log::info;
use std::io::Read;

use super::config::Config;
use crate::{
    credential::{CredentialProvider, TOKEN_ENV_VAR},
    runtime::Runtime,
};

/// Stores the token issued by the identity provider as the current session.
/// Reads the token from `stdin` when none is given.
#[tracing::instrument(skip(config, token, stdin))]
pub fn login<R: Runtime + 'static>(
    config: &Config<R>,
    token: Option<String>,
    mut stdin: impl Read,
) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Failed to read token from stdin")?;
            buf
        }
    };
    if token.trim().is_empty() {
        bail!("No token provided");
    }

    config.session().store(&token)?;
    println!("Signed in. Session saved to {}", config.session_path.display());
    Ok(())
}

/// Forgets the stored session. Returns whether there was one.
#[tracing::instrument(skip(config))]
pub fn logout<R: Runtime + 'static>(config: &Config<R>) -> Result<bool> {
    let removed = config.session().clear()?;
    if removed {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(removed)
}

/// Reports where the current credential would come from. A credential being
/// present does not mean the server will accept it.
#[tracing::instrument(skip(config))]
pub async fn status<R: Runtime + 'static>(config: &Config<R>) -> Result<bool> {
    if let Some(credential) = config.env_credential().credential().await? {
        println!("Signed in via {} (token {})", TOKEN_ENV_VAR, credential);
        return Ok(true);
    }
    if let Some(credential) = config.session().credential().await? {
        println!(
            "Signed in via session file {} (token {})",
            config.session_path.display(),
            credential
        );
        return Ok(true);
    }
    info!("No credential in {} or {:?}", TOKEN_ENV_VAR, config.session_path);
    println!("Not signed in.");
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use mockall::predicate::eq;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_login_status_logout_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parlance").join("session.json");
        let config = Config::new(RealRuntime, None, Some(path.clone())).unwrap();

        login(&config, None, Cursor::new("token-from-stdin-123\n")).unwrap();
        assert!(path.exists());

        // PARLANCE_TOKEN may be set in the environment running the tests
        if std::env::var(TOKEN_ENV_VAR).is_err() {
            assert!(status(&config).await.unwrap());
        }

        assert!(logout(&config).unwrap());
        assert!(!logout(&config).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_login_rejects_empty_token() {
        let dir = tempdir().unwrap();
        let config = Config::new(RealRuntime, None, Some(dir.path().join("s.json"))).unwrap();

        assert!(login(&config, Some("  ".to_string()), Cursor::new("")).is_err());
        assert!(login(&config, None, Cursor::new("\n")).is_err());
    }

    #[tokio::test]
    async fn test_status_prefers_env() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(TOKEN_ENV_VAR))
            .returning(|_| Ok("env-token-abcdefgh".to_string()));
        runtime.expect_exists().never();

        let config = Config::new(runtime, None, Some(PathBuf::from("/s.json"))).unwrap();
        assert!(status(&config).await.unwrap());
    }

    #[tokio::test]
    async fn test_status_signed_out() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime.expect_exists().returning(|_| false);

        let config = Config::new(runtime, None, Some(PathBuf::from("/s.json"))).unwrap();
        assert!(!status(&config).await.unwrap());
    }
}
