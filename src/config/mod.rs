#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{BackendArgs, CliConfig};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation::Validate};

/// Settings the binaries run with, after choosing between flags and a TOML file.
#[cfg(feature = "cli")]
pub struct LoadedConfig {
    pub provider: Box<dyn ConfigProvider>,
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl std::fmt::Debug for LoadedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedConfig")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

/// `--config` wins over the other flags; `--verbose` and `--json-logs` still apply.
#[cfg(feature = "cli")]
pub fn load(cli: CliConfig) -> Result<LoadedConfig> {
    match cli.backend.config.clone() {
        Some(path) => {
            let mut toml = TomlConfig::from_file(&path)?;
            toml.validate()?;
            if cli.backend.json_logs {
                toml.logging.get_or_insert_with(Default::default).json = Some(true);
            }
            let verbose = cli.backend.verbose || toml.verbose();
            let provider: Box<dyn ConfigProvider> = Box::new(toml);
            Ok(LoadedConfig { provider, verbose })
        }
        None => {
            cli.validate()?;
            let verbose = cli.backend.verbose;
            Ok(LoadedConfig {
                provider: Box::new(cli),
                verbose,
            })
        }
    }
}
