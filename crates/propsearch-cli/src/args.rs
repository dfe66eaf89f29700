use std::path::PathBuf;

use propsearch_core::DatasetId;

pub const USAGE: &str = "\
Usage: propsearch [OPTIONS]

Options:
  --offline            Use cached data only, do not contact the API
  --refresh <DATASET>  Download only DATASET (property, school, transit, metadata)
  --clear-cache        Delete cached snapshots before loading
  --save-config        Write the current config file and exit
  --lines              List every tube line
  --log-file <PATH>    Also write logs to PATH
  -h, --help           Show this help

Environment:
  PROPSEARCH_API_URL    API base URL (default http://localhost:3000/api)
  PROPSEARCH_CACHE_DIR  Cache directory
  RUST_LOG              Log filter (default warn)";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub offline: bool,
    pub refresh: Option<DatasetId>,
    pub clear_cache: bool,
    pub save_config: bool,
    pub lines: bool,
    pub log_file: Option<PathBuf>,
    pub help: bool,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--offline" => parsed.offline = true,
                "--refresh" => {
                    let dataset = args
                        .next()
                        .ok_or_else(|| "--refresh requires a dataset".to_string())?;
                    parsed.refresh = Some(dataset.parse()?);
                }
                "--clear-cache" => parsed.clear_cache = true,
                "--save-config" => parsed.save_config = true,
                "--lines" => parsed.lines = true,
                "--log-file" => {
                    let path = args
                        .next()
                        .ok_or_else(|| "--log-file requires a path".to_string())?;
                    parsed.log_file = Some(PathBuf::from(path));
                }
                "-h" | "--help" => parsed.help = true,
                other => return Err(format!("unknown argument: {}", other)),
            }
        }

        Ok(parsed)
    }
}
