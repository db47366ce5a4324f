use crate::config::toml_config::{HarnessConfig, InterfaceKind};
use crate::core::AppId;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InterfaceArg {
    Cli,
    Http,
}

impl From<InterfaceArg> for InterfaceKind {
    fn from(arg: InterfaceArg) -> Self {
        match arg {
            InterfaceArg::Cli => InterfaceKind::Cli,
            InterfaceArg::Http => InterfaceKind::Http,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "andromeda-harness")]
#[command(about = "Installs and runs integration tests against an Andromeda server")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "harness.toml")]
    pub config: String,

    /// Override the interface kind from config
    #[arg(long, value_enum)]
    pub interface: Option<InterfaceArg>,

    /// Override which apps are installed and tested
    #[arg(long, value_delimiter = ',')]
    pub apps: Vec<AppId>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Print the report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Show what would run without calling the server
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    pub fn apply_overrides(&self, config: &mut HarnessConfig) {
        if let Some(kind) = self.interface {
            config.interface.kind = kind.into();
            tracing::info!("🔧 Interface overridden to: {:?}", config.interface.kind);
        }
        if !self.apps.is_empty() {
            config.run.apps = self.apps.clone();
            tracing::info!("🔧 Apps overridden to: {:?}", config.run.apps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = CliArgs::parse_from([
            "andromeda-harness",
            "--config",
            "ci.toml",
            "--interface",
            "http",
            "--apps",
            "core,accounts",
        ]);
        assert_eq!(args.config, "ci.toml");
        assert_eq!(args.interface, Some(InterfaceArg::Http));
        assert_eq!(args.apps, vec![AppId::Core, AppId::Accounts]);
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = HarnessConfig::from_toml_str(
            r#"
[interface]
kind = "cli"
server_root = "/srv/andromeda"

[accounts]
admin_username = "admin"
admin_password = "password"
"#,
        )
        .unwrap();

        let args = CliArgs::parse_from(["andromeda-harness", "--interface", "http", "--apps", "core"]);
        args.apply_overrides(&mut config);

        assert_eq!(config.interface.kind, InterfaceKind::Http);
        assert_eq!(config.run.apps, vec![AppId::Core]);
    }
}
