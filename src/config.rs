use crate::address::listen_addr;
use clap::{CommandFactory, Parser};
use std::{ffi::OsString, path::PathBuf};

pub const PORT_ENV: &str = "SERVEDIR_PORT";
pub const ALL_INTERFACES_ENV: &str = "SERVEDIR_ALL_INTERFACES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub address: String,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: listen_addr(0, false),
            static_dir: PathBuf::from("."),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "servedir",
    version,
    about = "Simple HTTP server, serving files from given directory.",
    override_usage = "servedir [-a] [-p <port>] [<dir>]",
    after_help = "  <dir> defaults to current directory if not specified"
)]
struct Cli {
    /// listen on all interfaces, not just localhost (env: SERVEDIR_ALL_INTERFACES)
    #[arg(
        short = 'a',
        value_name = "bool",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_bool_flag
    )]
    all_interfaces: Option<bool>,

    /// port number (default: OS-chosen free port) (env: SERVEDIR_PORT)
    #[arg(short = 'p', value_name = "port")]
    port: Option<u16>,

    /// directory to serve; only the first one is used
    #[arg(value_name = "dir")]
    dirs: Vec<PathBuf>,
}

impl Config {
    /// Resolves the configuration from `args` (program name excluded) with
    /// environment defaults read through `env`. Flags win over the
    /// environment; malformed environment values are ignored.
    pub fn from_env_and_args<I, T, F>(args: I, env: F) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
        F: Fn(&str) -> Option<String>,
    {
        let argv = std::iter::once(OsString::from("servedir")).chain(args.into_iter().map(Into::into));
        let cli = Cli::try_parse_from(argv)?;

        let port = cli.port.or_else(|| env_port(&env)).unwrap_or(0);
        let all_interfaces = cli
            .all_interfaces
            .or_else(|| env_all_interfaces(&env))
            .unwrap_or(false);
        let static_dir = cli
            .dirs
            .into_iter()
            .next()
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            address: listen_addr(port, all_interfaces),
            static_dir,
        })
    }

    /// Resolves the configuration for the running process.
    pub fn from_process() -> Result<Self, clap::Error> {
        Self::from_env_and_args(std::env::args_os().skip(1), |key| std::env::var(key).ok())
    }
}

/// Full help text, including the usage line.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

fn env_port<F: Fn(&str) -> Option<String>>(env: &F) -> Option<u16> {
    env(PORT_ENV)?.parse().ok()
}

fn env_all_interfaces<F: Fn(&str) -> Option<String>>(env: &F) -> Option<bool> {
    parse_bool(&env(ALL_INTERFACES_ENV)?)
}

fn parse_bool_flag(value: &str) -> Result<bool, String> {
    parse_bool(value).ok_or_else(|| format!("invalid boolean value {:?}", value))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
