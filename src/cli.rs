use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compile a JSON action template into a Rust program")]
pub struct Cli {
    /// Package name of the generated program (whitespace is stripped)
    pub name: String,
    /// Input .json template
    pub template: PathBuf,
    /// Directory the generated project is saved under
    #[arg(long, default_value = "generated")]
    pub out_dir: PathBuf,
    /// Print the program without saving it
    #[arg(long)]
    pub no_save: bool,
    /// Number operation markers sequentially instead of using UUIDs
    #[arg(long)]
    pub sequential_names: bool,
}

impl Cli {
    pub fn package(&self) -> String {
        self.name.chars().filter(|c| !c.is_whitespace()).collect()
    }
}
