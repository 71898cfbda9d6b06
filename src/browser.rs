//! Web browser integration.
//!
//! Opens movie page links in the user's default browser.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Commands to try, in order, for the current platform.
fn opener_candidates() -> Vec<(&'static str, Vec<&'static str>)> {
    if cfg!(target_os = "macos") {
        vec![("open", vec![])]
    } else if cfg!(target_os = "windows") {
        vec![("cmd", vec!["/C", "start", ""])]
    } else {
        // $BROWSER is honoured by xdg-open itself; these cover minimal setups
        vec![
            ("xdg-open", vec![]),
            ("gio", vec!["open"]),
            ("sensible-browser", vec![]),
        ]
    }
}

/// Open a URL in the default web browser.
///
/// # Arguments
/// * `url` - Page to open (must be http or https)
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// The opener is spawned detached with its output discarded so it cannot
/// draw over the terminal UI.
pub fn open_url(url: &str) -> Result<()> {
    if !is_openable(url) {
        return Err(anyhow::anyhow!("Refusing to open non-web link: {}", url));
    }

    let candidates = opener_candidates();
    for (program, args) in &candidates {
        let spawned = Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_) => {
                tracing::info!(program, url, "opened link");
                return Ok(());
            }
            Err(e) => tracing::debug!(program, error = %e, "browser opener unavailable"),
        }
    }

    let (program, _) = candidates
        .first()
        .context("No browser opener configured for this platform")?;
    Err(anyhow::anyhow!(
        "Failed to open link with {}. URL: {}",
        program,
        url
    ))
}

/// Whether a link is safe to hand to the system opener.
pub fn is_openable(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}
