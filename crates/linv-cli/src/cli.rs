use clap::Parser;

/// Ansible dynamic inventory for Linode.
///
/// Reads `LINODE_API_KEY`, `LIMIT_GROUP`, `EXTERNAL_IPS` and
/// `NON_PREFIXED_TAGS` from the environment (or a `.env` file).
#[derive(Debug, Parser)]
#[command(name = "linode-inventory", version)]
pub struct Cli {
    /// List all available hosts (default action)
    #[arg(long, conflicts_with = "host")]
    pub list: bool,

    /// Output info on a specific host
    #[arg(long, value_name = "ADDRESS")]
    pub host: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Host(String),
}

impl Cli {
    pub fn command(self) -> Command {
        match self.host {
            Some(address) => Command::Host(address),
            None => Command::List,
        }
    }
}
