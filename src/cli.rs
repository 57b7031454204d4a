use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ytserve",
    about = "HTTP service exposing YouTube transcripts as plain text",
    version,
)]
pub struct Cli {
    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: 8000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Preferred caption languages, highest priority first [default: en]
    #[arg(short, long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Show config resolution details
    #[arg(short, long)]
    pub verbose: bool,
}
