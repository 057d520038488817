//! Probe configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use runtime::SandboxConfig;

/// What to load and how to report it.
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    pub data_dir: PathBuf,
    pub scene: String,
    /// Skill to cast; every skill in the catalog when unset.
    pub skill: Option<String>,
    /// Also list the best `n` entity targets of each skill; negative lists all.
    pub select: Option<i32>,
    pub json: bool,
    pub sandbox: SandboxConfig,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            scene: "corridor".to_owned(),
            skill: None,
            select: None,
            json: false,
            sandbox: SandboxConfig::default(),
        }
    }
}

impl ProbeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PROBE_DATA_DIR` - Content directory (default: `data`)
    /// - `PROBE_SCENE` - Scene name under `scenes/` (default: `corridor`)
    /// - `PROBE_SKILL` - Skill to cast (default: all skills)
    /// - `PROBE_SELECT` - Entity targets to list per skill (default: none)
    /// - `PROBE_JSON` - Print JSON lines instead of text (default: false)
    /// - `PROBE_SEED` - Sandbox seed (default: 0)
    /// - `PROBE_ENTITY_CAPACITY` - Entity table size (default: 1024)
    /// - `PROBE_PVP` - Whether players can be targeted (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("PROBE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(scene) = env::var("PROBE_SCENE") {
            config.scene = scene;
        }
        config.skill = env::var("PROBE_SKILL").ok().filter(|name| !name.is_empty());
        config.select = read_env::<i32>("PROBE_SELECT");

        if let Some(json) = read_env::<bool>("PROBE_JSON") {
            config.json = json;
        } else if env::var("PROBE_JSON").is_ok() {
            config.json = true;
        }

        if let Some(seed) = read_env::<u64>("PROBE_SEED") {
            config.sandbox.seed = seed;
        }
        if let Some(capacity) = read_env::<usize>("PROBE_ENTITY_CAPACITY") {
            config.sandbox.entity_capacity = capacity.max(1);
        }
        if let Some(pvp) = read_env::<bool>("PROBE_PVP") {
            config.sandbox.rules.pvp = pvp;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
