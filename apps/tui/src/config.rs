use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Radar shape settings, read from the environment with the classic
/// four-quadrant / four-ring radar as the default. Rings are listed
/// innermost first.
#[derive(Debug, Clone)]
pub struct RadarSettings {
    pub sectors: Vec<String>,
    pub rings: Vec<String>,
    pub rotation_degrees: f64,
}

impl Default for RadarSettings {
    fn default() -> Self {
        Self {
            sectors: list_of(&["platforms", "languages", "tools", "techniques"]),
            rings: list_of(&["adopt", "trial", "assess", "hold"]),
            rotation_degrees: 0.0,
        }
    }
}

fn list_of(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Reads `RADAR_SECTORS`, `RADAR_RINGS`, and `RADAR_ROTATION` overrides,
/// keeping the defaults for anything unset or unparsable.
pub fn radar_settings() -> RadarSettings {
    let mut settings = RadarSettings::default();

    if let Ok(value) = env::var("RADAR_SECTORS") {
        let sectors = parse_list(&value);
        if !sectors.is_empty() {
            settings.sectors = sectors;
        }
    }
    if let Ok(value) = env::var("RADAR_RINGS") {
        let rings = parse_list(&value);
        if !rings.is_empty() {
            settings.rings = rings;
        }
    }
    if let Ok(value) = env::var("RADAR_ROTATION") {
        if let Ok(rotation) = value.trim().parse::<f64>() {
            settings.rotation_degrees = rotation;
        }
    }

    settings
}

/// Initializes the application configuration and returns the database URL.
pub fn init_app_config() -> color_eyre::eyre::Result<String> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir: PathBuf = env::current_dir()?;
    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "radar.db".to_string());
    let database_path = base_dir.join(&db_name);

    if let Some(parent) = database_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?
        .to_string();

    // SQLx wants sqlite:///absolute/path (3 slashes) for absolute paths and
    // sqlite://relative/path (2 slashes) otherwise.
    let clean_path = path_str.trim_start_matches('/');
    let database_url = if database_path.is_absolute() {
        format!("sqlite:///{clean_path}")
    } else {
        format!("sqlite://{clean_path}")
    };

    Ok(database_url)
}
