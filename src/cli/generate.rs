use clap::Parser;

/// Arguments for the generate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate every platform:\n    d3gen generate --all\n\n\
                  Generate one platform:\n    d3gen generate --platform cursor\n\n\
                  Generate from another canonical tree:\n    d3gen generate --all --canonical ./src-docs")]
pub struct GenerateArgs {
    /// Platform id declared in the platform descriptor
    #[arg(long, value_name = "PLATFORM", conflicts_with = "all", required_unless_present = "all")]
    pub platform: Option<String>,

    /// Generate for all declared platforms
    #[arg(long)]
    pub all: bool,
}
