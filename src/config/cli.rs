use crate::config::toml_config::TomlConfig;
use crate::config::RunConfig;
use crate::core::InputFormat;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "closer", version)]
#[command(about = "Converts D2L CSV to eLumen with strict validation.")]
pub struct CliConfig {
    /// Path to source D2L CSV.
    pub input_fname: String,

    /// Path to destination CSV.
    pub output_fname: String,

    /// Passing percent (e.g. 70). Defaults to 70.
    #[arg(short, long)]
    pub threshold: Option<u32>,

    /// Line convention of the D2L export. Defaults to marker.
    #[arg(short, long, value_enum)]
    pub format: Option<InputFormat>,

    /// TOML file with default settings.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    pub fn into_run_config(self) -> Result<RunConfig> {
        let file = self.config.as_deref().map(TomlConfig::from_file).transpose()?;

        RunConfig::resolve(
            self.input_fname,
            self.output_fname,
            self.threshold,
            self.format,
            self.verbose,
            file.as_ref(),
        )
    }
}
