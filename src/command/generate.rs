//! Release notes generation and publication command.
use log::*;
use std::{path::Path, rc::Rc};
use tokio::fs;

use crate::{
    Result, cli,
    config::RelnoteConfig,
    forge::{
        github::Github,
        manager::{ForgeManager, ForgeOptions},
    },
    notes::builder::{ReleaseNoteBuilder, ReleaseNotes},
};

/// Execute the command against GitHub.
pub async fn execute(config: RelnoteConfig) -> Result<()> {
    let forge = Github::new(config.remote.clone())?;
    let forge_manager = Rc::new(ForgeManager::new(
        Box::new(forge),
        ForgeOptions {
            dry_run: config.dry_run,
        },
    ));

    run(Rc::new(config), forge_manager).await?;

    Ok(())
}

/// Builds and prints the notes, then publishes them when a tag name and a
/// release name are configured. Returns the url of the created release.
pub async fn run(
    config: Rc<RelnoteConfig>,
    forge_manager: Rc<ForgeManager>,
) -> Result<Option<String>> {
    let mut builder =
        ReleaseNoteBuilder::new(Rc::clone(&config), Rc::clone(&forge_manager))?;

    let notes = builder.build().await?;

    println!();
    println!("{}\n", notes.header());
    print!("{}", notes.body());

    if let Some(out_file) = config.out_file.as_deref() {
        write_notes(out_file, &notes).await?;
    }

    publish(&config, &forge_manager, &notes).await
}

async fn write_notes(file_path: &Path, notes: &ReleaseNotes) -> Result<()> {
    if let Some(parent) = file_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).await?;
    }

    info!("writing release notes to: {}", file_path.display());
    fs::write(file_path, notes.body()).await?;

    Ok(())
}

async fn publish(
    config: &RelnoteConfig,
    forge_manager: &ForgeManager,
    notes: &ReleaseNotes,
) -> Result<Option<String>> {
    let Some(req) = notes.release_request(config) else {
        if forge_manager.dry_run() {
            warn!("dry_run: no tag name or release name given: skipping release");
            return Ok(None);
        }
        return Err(cli::release_usage_error());
    };

    let url = forge_manager.create_release(req).await?;

    if let Some(url) = url.as_deref() {
        println!("release url: {url}");
    }

    Ok(url)
}
