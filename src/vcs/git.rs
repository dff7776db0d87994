//! AUR repository access through the `git` command line

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::vcs::error::TransportError;
use crate::vcs::{RemoteRepository, Signature, WorkingCopy};

/// Default base URL of AUR package repositories
pub const DEFAULT_REMOTE_BASE: &str = "ssh://aur@aur.archlinux.org";

/// Environment variable the askpass helper reads the key passphrase from
const PASSPHRASE_ENV: &str = "AUR_AUTOUPDATER_SSH_PASSPHRASE";

const ASKPASS_SCRIPT: &str = "#!/bin/sh\nprintf '%s\\n' \"$AUR_AUTOUPDATER_SSH_PASSPHRASE\"\n";

type GitEnv = Vec<(&'static str, String)>;

/// SSH key used to authenticate against the AUR
#[derive(Clone)]
pub struct SshCredentials {
    /// Private key material in OpenSSH or PEM format
    pub private_key: String,
    pub passphrase: Option<String>,
}

impl fmt::Debug for SshCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshCredentials")
            .field("private_key", &"<redacted>")
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Clones AUR repositories with the `git` CLI
///
/// Host key verification is disabled unless a known_hosts file is supplied
/// with [`GitRemote::with_known_hosts`].
pub struct GitRemote {
    remote_base: String,
    credentials: Option<SshCredentials>,
    known_hosts: Option<PathBuf>,
}

impl GitRemote {
    pub fn new(remote_base: &str) -> Self {
        Self {
            remote_base: remote_base.trim_end_matches('/').to_string(),
            credentials: None,
            known_hosts: None,
        }
    }

    pub fn with_credentials(mut self, credentials: SshCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_known_hosts(mut self, known_hosts: impl Into<PathBuf>) -> Self {
        self.known_hosts = Some(known_hosts.into());
        self
    }

    /// Repository URL of `package_name`
    pub fn remote_url(&self, package_name: &str) -> String {
        format!("{}/{}.git", self.remote_base, package_name)
    }

    fn ssh_command(&self, identity: Option<&Path>) -> String {
        let mut parts = vec!["ssh".to_string()];

        if let Some(identity) = identity {
            parts.push(format!("-i {}", shell_quote(identity)));
            parts.push("-o IdentitiesOnly=yes".to_string());
        }

        match &self.known_hosts {
            Some(known_hosts) => {
                parts.push("-o StrictHostKeyChecking=yes".to_string());
                parts.push(format!("-o UserKnownHostsFile={}", shell_quote(known_hosts)));
            }
            None => {
                parts.push("-o StrictHostKeyChecking=no".to_string());
                parts.push("-o UserKnownHostsFile=/dev/null".to_string());
            }
        }

        parts.join(" ")
    }

    /// Writes the key material into `dir` and builds the environment for git
    async fn prepare_env(&self, dir: &Path) -> Result<GitEnv, TransportError> {
        let mut env = GitEnv::new();

        let Some(credentials) = &self.credentials else {
            env.push(("GIT_SSH_COMMAND", self.ssh_command(None)));
            return Ok(env);
        };

        let identity = dir.join("id_aur");
        let mut key = credentials.private_key.clone();
        if !key.ends_with('\n') {
            key.push('\n');
        }
        write_private_file(&identity, &key, 0o600).await?;
        env.push(("GIT_SSH_COMMAND", self.ssh_command(Some(&identity))));

        if let Some(passphrase) = &credentials.passphrase {
            let askpass = dir.join("askpass.sh");
            write_private_file(&askpass, ASKPASS_SCRIPT, 0o700).await?;
            env.push(("SSH_ASKPASS", askpass.display().to_string()));
            env.push(("SSH_ASKPASS_REQUIRE", "force".to_string()));
            env.push((PASSPHRASE_ENV, passphrase.clone()));
        }

        Ok(env)
    }
}

#[async_trait::async_trait]
impl RemoteRepository for GitRemote {
    async fn checkout(&self, package_name: &str) -> Result<Box<dyn WorkingCopy>, TransportError> {
        let url = self.remote_url(package_name);

        let dir = tempfile::Builder::new()
            .prefix("aur-autoupdater-")
            .tempdir()
            .map_err(|e| TransportError::io(std::env::temp_dir(), e))?;

        if self.known_hosts.is_none() {
            warn!(
                "Host key verification is disabled for {}; set AUR_KNOWN_HOSTS to enable it",
                url
            );
        }

        let env = self.prepare_env(dir.path()).await?;
        let path = dir.path().join(package_name);

        run_git(dir.path(), &env, &["clone", "--quiet", url.as_str(), package_name]).await?;
        let head = run_git(&path, &env, &["rev-parse", "HEAD"]).await?;

        info!("Cloned {} at {}", url, head);

        Ok(Box::new(GitWorkingCopy {
            path,
            env,
            _dir: dir,
        }))
    }
}

/// Working copy in a temporary directory, deleted on drop
struct GitWorkingCopy {
    path: PathBuf,
    env: GitEnv,
    _dir: TempDir,
}

#[async_trait::async_trait]
impl WorkingCopy for GitWorkingCopy {
    async fn read_file(&self, path: &str) -> Result<String, TransportError> {
        let full_path = self.path.join(path);
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| TransportError::io(full_path, e))
    }

    async fn write_file(&mut self, path: &str, contents: &str) -> Result<(), TransportError> {
        let full_path = self.path.join(path);
        tokio::fs::write(&full_path, contents)
            .await
            .map_err(|e| TransportError::io(full_path, e))
    }

    async fn stage(&mut self, paths: &[&str]) -> Result<(), TransportError> {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        run_git(&self.path, &self.env, &args).await?;
        Ok(())
    }

    async fn commit(
        &mut self,
        message: &str,
        author: &Signature,
    ) -> Result<String, TransportError> {
        let mut env = self.env.clone();
        env.extend([
            ("GIT_AUTHOR_NAME", author.name.clone()),
            ("GIT_AUTHOR_EMAIL", author.email.clone()),
            ("GIT_COMMITTER_NAME", author.name.clone()),
            ("GIT_COMMITTER_EMAIL", author.email.clone()),
        ]);

        run_git(&self.path, &env, &["commit", "--quiet", "-m", message]).await?;
        let commit = run_git(&self.path, &env, &["rev-parse", "HEAD"]).await?;

        info!("Committed {} ({})", commit, message);

        Ok(commit)
    }

    async fn push(&mut self) -> Result<(), TransportError> {
        run_git(&self.path, &self.env, &["push", "--quiet", "origin", "HEAD"]).await?;
        info!("Pushed {}", self.path.display());
        Ok(())
    }
}

/// Runs git in `cwd` and returns its trimmed stdout
async fn run_git(
    cwd: &Path,
    env: &[(&'static str, String)],
    args: &[&str],
) -> Result<String, TransportError> {
    let command = args.first().copied().unwrap_or_default().to_string();

    debug!("git {} (in {})", args.join(" "), cwd.display());

    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .envs(env.iter().map(|(key, value)| (*key, value.as_str())))
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| TransportError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(TransportError::Git {
            command,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

async fn write_private_file(path: &Path, contents: &str, mode: u32) -> Result<(), TransportError> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options
        .open(path)
        .await
        .map_err(|e| TransportError::io(path, e))?;
    file.write_all(contents.as_bytes())
        .await
        .map_err(|e| TransportError::io(path, e))?;
    file.sync_all()
        .await
        .map_err(|e| TransportError::io(path, e))
}

fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}
