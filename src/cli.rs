//! Command-line argument parsing for the demo binary
//!
//! Supports:
//! - Opening several windows
//! - Binding extra accelerators to a window or to the global scope
//! - An explicit config file

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// Try out window-scoped and global shortcuts
#[derive(Parser, Debug)]
#[command(
    name = "localshortcut-demo",
    version,
    about = "Try out window-scoped and global shortcuts"
)]
pub struct CliArgs {
    /// Number of windows to open at startup
    #[arg(short = 'w', long, default_value_t = 2, value_name = "N")]
    pub windows: usize,

    /// Extra binding as SCOPE=ACCELERATOR; SCOPE is `global` or a 1-based window number
    #[arg(short = 'b', long = "bind", value_name = "SCOPE=ACCEL")]
    pub bindings: Vec<BindArg>,

    /// Config file (defaults to ~/.config/localshortcut/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info", value_name = "FILTER")]
    pub log_level: String,
}

/// Scope part of a `--bind` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindScope {
    Global,
    /// 1-based index of a startup window
    Window(usize),
}

/// A parsed `--bind SCOPE=ACCEL` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindArg {
    pub scope: BindScope,
    pub accelerator: String,
}

impl FromStr for BindArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scope, accelerator) = s
            .split_once('=')
            .ok_or_else(|| format!("expected SCOPE=ACCEL, got '{}'", s))?;

        let scope = match scope.trim().to_lowercase().as_str() {
            "global" | "g" => BindScope::Global,
            other => {
                let index: usize = other
                    .parse()
                    .map_err(|_| format!("scope must be 'global' or a window number, got '{}'", scope))?;
                if index == 0 {
                    return Err("window numbers start at 1".to_string());
                }
                BindScope::Window(index)
            }
        };

        let accelerator = accelerator.trim();
        if accelerator.is_empty() {
            return Err(format!("missing accelerator in '{}'", s));
        }

        Ok(Self {
            scope,
            accelerator: accelerator.to_string(),
        })
    }
}

impl fmt::Display for BindArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            BindScope::Global => write!(f, "global={}", self.accelerator),
            BindScope::Window(n) => write!(f, "{}={}", n, self.accelerator),
        }
    }
}
