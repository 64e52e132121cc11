use clap::Parser;

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Validate all platforms:\n    d3gen validate\n\n\
                  Validate one platform:\n    d3gen validate --platform copilot")]
pub struct ValidateArgs {
    /// Only validate this platform
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,
}
