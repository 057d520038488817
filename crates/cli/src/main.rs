//! Target probe binary.
//!
//! Loads a scene and a skill catalog from a content directory, casts each
//! skill from the scene's caster and prints what it resolved to.
//!
//! ```bash
//! PROBE_SCENE=quarry PROBE_SKILL=blast cargo run -p target-probe
//! PROBE_JSON=true PROBE_SELECT=3 cargo run -p target-probe
//! ```
mod config;
mod report;

use anyhow::{Context, Result};
use config::ProbeConfig;
use report::CastReport;
use runtime::{CastDriver, Sandbox};
use targeting_content::{ContentFactory, SkillDefinition};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ProbeConfig::from_env();
    setup_logging();

    let factory = ContentFactory::new(&config.data_dir);
    let scene = factory.load_scene(&config.scene)?;
    let catalog = factory.load_skills()?;
    tracing::info!(
        data_dir = %factory.data_dir().display(),
        scene = %config.scene,
        skills = catalog.len(),
        "content loaded"
    );

    let skills: Vec<&SkillDefinition> = match &config.skill {
        Some(name) => vec![
            catalog
                .get(name)
                .with_context(|| format!("unknown skill '{name}'"))?,
        ],
        None => catalog.iter().collect(),
    };

    let mut driver = CastDriver::new();
    for skill in skills {
        // Every skill sees the scene as loaded.
        let mut sandbox = Sandbox::from_scene(&scene, &config.sandbox)?;
        let selected = match config.select {
            Some(count) => Some(driver.select(&sandbox, skill, count)?),
            None => None,
        };
        let outcome = driver.cast(&mut sandbox, skill)?;

        let mut report = CastReport::new(&sandbox, &outcome);
        if let Some(handles) = selected {
            report = report.with_selected(&sandbox, &handles);
        }
        if config.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{report}");
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
