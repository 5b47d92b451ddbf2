use ads_core::{ExtractOptions, Operation};
use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "List, extract, add and remove NTFS alternate data streams",
    long_about = None
)]
#[command(group(
    ArgGroup::new("operation")
        .args(["extract", "add_file", "remove_all", "remove_stream"])
        .multiple(false)
))]
pub struct Cli {
    /// Host files; directories are skipped
    #[arg(required_unless_present = "stdin")]
    pub files: Vec<PathBuf>,

    /// Also read newline-separated host paths from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Copy every named stream into the output directory
    #[arg(long)]
    pub extract: bool,

    /// Where extracted streams go [default: ADSOutput]
    #[arg(long, requires = "extract")]
    pub output_directory: Option<PathBuf>,

    /// Embed this file as a stream named after its base name
    #[arg(long)]
    pub add_file: Option<PathBuf>,

    /// Delete every named stream
    #[arg(long)]
    pub remove_all: bool,

    /// Delete the named stream
    #[arg(long)]
    pub remove_stream: Option<String>,

    /// Print listings as JSON lines
    #[arg(long)]
    pub json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn operation(&self) -> Operation {
        if self.extract {
            let mut opts = ExtractOptions::default();
            if let Some(dir) = &self.output_directory {
                opts.output_dir = dir.clone();
            }
            Operation::Extract(opts)
        } else if let Some(src) = &self.add_file {
            Operation::Add {
                source: src.clone(),
            }
        } else if self.remove_all {
            Operation::RemoveAll
        } else if let Some(name) = &self.remove_stream {
            Operation::RemoveStream(name.clone())
        } else {
            Operation::List
        }
    }
}
