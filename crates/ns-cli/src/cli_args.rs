use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nyan")]
#[command(about = "NyanScript engine CLI")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    Run(RunArgs),
    Doc(DocArgs),
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    #[arg(long = "script")]
    pub(crate) script: String,
}

#[derive(Debug, Args)]
pub(crate) struct DocArgs {
    #[arg(long = "document")]
    pub(crate) document: String,
    #[arg(long = "json", default_value_t = false)]
    pub(crate) json: bool,
}

#[derive(Debug, Args)]
pub(crate) struct BatchArgs {
    #[arg(long = "dir")]
    pub(crate) dir: String,
}
