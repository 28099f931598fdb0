use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    envprep completions bash > ~/.bash_completion.d/envprep\n\n\
                  Generate zsh completions:\n    envprep completions zsh > ~/.zfunc/_envprep\n\n\
                  Generate fish completions:\n    envprep completions fish > ~/.config/fish/completions/envprep.fish\n\n\
                  Generate PowerShell completions:\n    envprep completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
