mod headless;

use clap::Parser;
use headless::app::{AppHeadless, Source};
use seedfile_core::LoggingConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seedfile", version, about = "Create a file with the given content unless it already exists")]
struct Args {
    /// JSON arguments file written by the host; overrides the flags below
    args_file: Option<PathBuf>,

    /// Where the file will be created (defaults to ~/default.name)
    #[arg(long)]
    path: Option<String>,

    /// Content of the created file
    #[arg(long)]
    content: Option<String>,

    /// Report without touching the filesystem
    #[arg(long)]
    check: bool,

    /// Config file (defaults to ~/.seedfile.config when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the parameter JSON Schema and exit
    #[arg(long)]
    schema: bool,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn source(&self) -> Source {
        match &self.args_file {
            Some(path) => Source::ArgsFile(path.clone()),
            None => Source::Flags {
                path: self.path.clone(),
                content: self.content.clone(),
                check_mode: self.check,
            },
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = LoggingConfig::from_env().init() {
        eprintln!("seedfile: logging disabled: {}", e);
    }

    let app = AppHeadless::new(args.config.clone(), args.pretty);
    let code = if args.schema {
        app.print_schema()
    } else {
        app.run(args.source())
    };

    std::process::exit(code);
}
