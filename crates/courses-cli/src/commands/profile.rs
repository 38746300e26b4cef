//! Chrome profiles kept under `~/.courses/profiles`.
//!
//! A named profile keeps the shop's login cookies, so later runs with
//! `--profile <name>` usually skip the login form.

use anyhow::{Result, anyhow};
use courses_browser::ProfileManager;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

fn profile_names() -> Result<Vec<(String, PathBuf)>> {
    let root = ProfileManager::profiles_root()?;
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut profiles = Vec::new();
    for entry in fs::read_dir(&root)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            profiles.push((name.to_string(), path.clone()));
        }
    }

    profiles.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(profiles)
}

pub fn list() -> Result<()> {
    let profiles = profile_names()?;

    if profiles.is_empty() {
        println!(
            "No profiles found. Profiles will be created in: {}",
            ProfileManager::profiles_root()?.display()
        );
        return Ok(());
    }

    println!("Available profiles:");
    for (name, path) in profiles {
        println!("  {:<20} {}", name, path.display());
    }

    Ok(())
}

pub fn delete(name: &str, force: bool) -> Result<()> {
    let (_, path) = profile_names()?
        .into_iter()
        .find(|(n, _)| n == name)
        .ok_or_else(|| anyhow!("Profile '{}' not found", name))?;

    if !force {
        print!(
            "⚠️  This will delete profile '{}' and its saved login.\nType '{}' to confirm: ",
            name, name
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if input.trim() != name {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    fs::remove_dir_all(&path)?;
    println!("✅ Profile '{}' deleted", name);

    Ok(())
}
