use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "techradar-tui", version, about = "Terminal tech radar viewer")]
pub struct CliArgs {
    /// Compute one layout, print it, and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless layout as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Comma-separated sector list, innermost ring first for --rings
    #[arg(long, value_name = "LIST")]
    pub sectors: Option<String>,

    /// Comma-separated ring list
    #[arg(long, value_name = "LIST")]
    pub rings: Option<String>,

    /// Radar rotation in degrees
    #[arg(long, value_name = "DEGREES")]
    pub rotation: Option<f64>,

    /// Seed for the packing run; random when omitted
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl CliArgs {
    /// Flags beat environment variables; pushing them into the environment
    /// keeps the config module as the single reader.
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(sectors) = &self.sectors {
            std::env::set_var("RADAR_SECTORS", sectors);
        }
        if let Some(rings) = &self.rings {
            std::env::set_var("RADAR_RINGS", rings);
        }
        if let Some(rotation) = self.rotation {
            std::env::set_var("RADAR_ROTATION", rotation.to_string());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
