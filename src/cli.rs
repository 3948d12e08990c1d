use std::{path::PathBuf, str::FromStr};

use alloy::primitives::{Address, Bytes, B256};
use clap::{
    builder::styling::{AnsiColor, Color, Style},
    Parser, Subcommand,
};
use reqwest::Url;

use crate::onboarding::OperatorType;

/// `onboard` signs up operators with the staking protocol and the service that depends on it.
#[derive(Parser, Debug, Clone)]
#[command(author, version, styles = cli_styles(), about, arg_required_else_help(true))]
pub struct Opts {
    /// The subcommand to run.
    #[clap(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Cmd {
    /// Stake, register with the staking protocol and register with the service.
    SignUp(SignUpCommand),

    /// Show the onboarding state of an operator without sending transactions.
    Status(StatusCommand),
}

impl Cmd {
    /// Run the command.
    pub async fn run(self) -> eyre::Result<()> {
        match self {
            Self::SignUp(cmd) => cmd.run().await,
            Self::Status(cmd) => cmd.run().await,
        }
    }
}

/// Where the registries live.
#[derive(Debug, Clone, Parser)]
pub struct NetworkOpts {
    /// The network whose deployments to use.
    #[clap(long, env = "NETWORK", default_value = "anvil")]
    pub network: String,

    /// The URL of the RPC to broadcast the transactions.
    #[clap(long, env = "RPC_URL")]
    pub rpc_url: Url,

    /// A JSON file mapping network names to deployment addresses. Defaults to the
    /// deployments built into the binary.
    #[clap(long, env = "DEPLOYMENTS_PATH")]
    pub deployments: Option<PathBuf>,
}

/// Command for signing up an operator.
#[derive(Debug, Clone, Parser)]
pub struct SignUpCommand {
    /// The kind of operator to sign up.
    #[clap(long, env = "OPERATOR_TYPE", value_enum)]
    pub operator_type: OperatorType,

    #[clap(flatten)]
    pub network: NetworkOpts,

    /// The private key of the operator.
    #[clap(long, env = "OPERATOR_PRIVATE_KEY", hide_env_values = true)]
    pub operator_private_key: B256,

    /// The private key of the service owner, used to add the operator to the allowlist.
    /// Defaults to the operator key.
    #[clap(long, env = "OWNER_PRIVATE_KEY", hide_env_values = true)]
    pub owner_private_key: Option<B256>,

    /// The operator's address on the secondary chain, in hex.
    #[clap(long, env = "CROSS_CHAIN_ADDRESS", value_parser = parse_cross_chain_address)]
    pub cross_chain_address: Bytes,

    /// Skip the confirmation prompt.
    #[clap(long, short = 'y', env = "SKIP_CONFIRMATION", default_value = "false")]
    pub yes: bool,
}

/// Command for checking the onboarding state of an operator.
#[derive(Debug, Clone, Parser)]
pub struct StatusCommand {
    /// The kind of operator to check.
    #[clap(long, env = "OPERATOR_TYPE", value_enum)]
    pub operator_type: OperatorType,

    #[clap(flatten)]
    pub network: NetworkOpts,

    /// The address of the operator to check.
    #[clap(long, env = "OPERATOR_ADDRESS")]
    pub address: Address,
}

fn parse_cross_chain_address(value: &str) -> Result<Bytes, String> {
    let bytes = Bytes::from_str(value).map_err(|e| format!("invalid hex: {e}"))?;
    if bytes.is_empty() {
        return Err("cross-chain address must not be empty".to_string());
    }
    Ok(bytes)
}

/// Styles for the CLI application.
const fn cli_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(Style::new().bold().underline().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
        .header(Style::new().bold().underline().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .invalid(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
        .error(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
        .valid(Style::new().bold().underline().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}
