use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    d3gen completions --shell bash > ~/.bash_completion.d/d3gen\n\n\
                  Generate zsh completions:\n    d3gen completions --shell zsh > ~/.zfunc/_d3gen\n\n\
                  Generate fish completions:\n    d3gen completions --shell fish > ~/.config/fish/completions/d3gen.fish\n\n\
                  Generate PowerShell completions:\n    d3gen completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
