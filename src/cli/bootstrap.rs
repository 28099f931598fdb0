use clap::Parser;
use std::path::PathBuf;

/// Arguments for the bootstrap command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Full bootstrap:\n    envprep bootstrap\n\n\
                   Recreate the environment from scratch:\n    envprep bootstrap --force\n\n\
                   Use an alternate manifest:\n    envprep bootstrap --manifest deps/requirements.txt\n\n\
                   Prepare only the runtime and environment:\n    envprep bootstrap --skip-validation")]
pub struct BootstrapArgs {
    /// Recreate the virtual environment even when it is valid
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Accept any Python 3 interpreter without enforcing the minimum version
    #[arg(long = "skip-runtime-check")]
    pub skip_runtime_check: bool,

    /// Skip the post-install health validation
    #[arg(long = "skip-validation")]
    pub skip_validation: bool,

    /// Skip dependency preparation entirely and hand off immediately
    #[arg(long = "no-deps-check")]
    pub no_deps_check: bool,

    /// Show every command executed and its output
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Path to the dependency manifest (defaults to <project>/requirements.txt)
    #[arg(long, short = 'm', value_name = "PATH")]
    pub manifest: Option<PathBuf>,
}
