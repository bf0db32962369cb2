use std::{io::Write, path::PathBuf, process::ExitCode};

use clap::Parser;
use embed::{Config, Generator, Status};

/// Config file picked up from the working directory when `--config` isn't
/// given.
const DEFAULT_CONFIG: &str = "frontend-header.idm";

#[derive(Parser, Debug)]
#[command(about = "Gzip web assets into a PROGMEM header for the firmware")]
struct Args {
    #[arg(long, value_name = "FILE", help = "IDM config file")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory of asset files")]
    input: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Where to write the header")]
    output: Option<PathBuf>,

    #[arg(long, value_name = "NAME", help = "File name of the header")]
    header: Option<String>,

    #[arg(long, help = "Storage qualifier for the arrays")]
    qualifier: Option<String>,

    #[arg(long, help = "Only check that the header is up to date")]
    check: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut ret = match &self.config {
            Some(path) => Config::load(path)?,
            None if std::path::Path::new(DEFAULT_CONFIG).is_file() => {
                Config::load(DEFAULT_CONFIG)?
            }
            None => Config::default(),
        };

        // Command line wins over the config file.
        if let Some(dir) = &self.input {
            ret.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output {
            ret.output_dir = dir.clone();
        }
        if let Some(name) = &self.header {
            ret.header_name = name.clone();
        }
        if let Some(qualifier) = &self.qualifier {
            ret.qualifier = qualifier.clone();
        }
        Ok(ret)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    // Plain message lines, the build log is the only consumer.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format(|buf, record| writeln!(buf, "{}", record.args()))
    .init();

    let args = Args::parse();
    let generator = Generator::new(args.config()?);
    log::debug!("{:?}", generator.config());

    if !args.check {
        generator.generate()?;
        return Ok(ExitCode::SUCCESS);
    }

    let path = generator.config().header_path();
    match generator.check()? {
        Status::UpToDate => {
            log::info!("Header file up to date: {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Status::NoInputs => {
            log::info!("No files found in the input directory.");
            Ok(ExitCode::SUCCESS)
        }
        Status::Stale => {
            log::error!("Header file out of date: {}", path.display());
            Ok(ExitCode::FAILURE)
        }
        Status::Missing => {
            log::error!("Header file missing: {}", path.display());
            Ok(ExitCode::FAILURE)
        }
    }
}
