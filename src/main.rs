use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use store_api_cli::StoreApiService;
use store_api_cli::catalog::FileApiCatalog;
use store_api_cli::config::StoreConfig;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();
    store_api_cli::telemetry::init(matches.get_flag("verbose"));

    let pretty = matches.get_flag("pretty");
    let config_path = matches
        .get_one::<PathBuf>("config")
        .ok_or_else(|| anyhow!("--config required"))?;
    let config = StoreConfig::load(config_path)?;
    let service = StoreApiService::new(config);

    match matches.subcommand() {
        Some(("definition", sub)) => {
            let api_id = required_arg(sub, "api-id")?;
            let body = service.fetch_definition_json(api_id)?;
            write_stdout_line(&body)
        }
        Some(("resource-paths", sub)) => {
            let api_uuid = required_arg(sub, "api-uuid")?;
            let envelope = service
                .get_resource_paths_by_uuid(api_uuid)
                .with_context(|| format!("resource paths for {api_uuid}"))?;
            write_json_output(&envelope, pretty)
        }
        Some(("resource-paths-by-id", sub)) => {
            let api_id = *sub
                .get_one::<i64>("api-id")
                .ok_or_else(|| anyhow!("api id required"))?;
            let catalog = load_catalog(sub)?;
            let envelope = service
                .get_resource_paths_by_id(&catalog, api_id)
                .with_context(|| format!("resource paths for api {api_id}"))?;
            write_json_output(&envelope, pretty)
        }
        Some(("endpoints", sub)) => {
            let api_context = required_arg(sub, "api-context")?;
            let urls = service.endpoint_urls(api_context)?;
            write_json_output(&urls, pretty)
        }
        _ => Err(anyhow!("command required")),
    }
}

fn build_cli() -> Command {
    Command::new("store-api")
        .about("Resolve API resource paths and gateway endpoints from the API store")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("API manager configuration (YAML)"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Pretty-print JSON output"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(
            Command::new("definition")
                .about("Print the raw store response for an API")
                .arg(Arg::new("api-id").required(true)),
        )
        .subcommand(
            Command::new("resource-paths")
                .about("List resource paths and verbs from the published definition")
                .arg(Arg::new("api-uuid").required(true)),
        )
        .subcommand(
            Command::new("resource-paths-by-id")
                .about("List stored resource paths with gateway endpoint URLs")
                .arg(
                    Arg::new("api-id")
                        .required(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("catalog")
                        .long("catalog")
                        .required(true)
                        .value_name("PATH")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Stored API catalog (YAML)"),
                ),
        )
        .subcommand(
            Command::new("endpoints")
                .about("Build gateway endpoint URLs for an API context")
                .arg(Arg::new("api-context").required(true)),
        )
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{name} required"))
}

fn load_catalog(matches: &ArgMatches) -> Result<FileApiCatalog> {
    let path: &Path = matches
        .get_one::<PathBuf>("catalog")
        .ok_or_else(|| anyhow!("--catalog required"))?;
    Ok(FileApiCatalog::load(path)?)
}

fn write_json_output<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty {
        write_stdout_line(&serde_json::to_string_pretty(value)?)
    } else {
        write_stdout_line(&serde_json::to_string(value)?)
    }
}

fn write_stdout_line(line: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(line.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
