use anyhow::Context;
use breaks_cli::{commands, logging, SiteConfig};
use breaks_model::Wcag2Catalog;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;

fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_parser(value_parser!(PathBuf))
        .help("Source root to scan (overrides source_root)")
}

fn sections_arg() -> Arg {
    Arg::new("sections")
        .long("sections")
        .value_parser(value_parser!(PathBuf))
        .help("Area catalog JSON (overrides sections_file)")
}

fn cli() -> Command {
    Command::new("breaks")
        .version(breaks_cli::VERSION)
        .about("Extract, validate and present documented accessibility breaks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Site configuration file (default: ./breaks.toml if present)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
        .subcommand(
            Command::new("scan")
                .about("Print raw break records as JSON")
                .arg(root_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Print validated breaks as JSON")
                .arg(root_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Validate breaks and resolve every area reference")
                .arg(root_arg())
                .arg(sections_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the report as JSON"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render the break list HTML for a list state")
                .arg(root_arg())
                .arg(sections_arg())
                .arg(
                    Arg::new("query")
                        .long("query")
                        .default_value("")
                        .help("List state as a query string, e.g. a=failure&v=2&q=contrast"),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .help("Link prefix for areas (overrides museum_base_url)"),
                ),
        )
}

/// Config file values, then command-line overrides
fn site_config(matches: &ArgMatches, args: &ArgMatches) -> anyhow::Result<SiteConfig> {
    let mut config = SiteConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(root) = args.try_get_one::<PathBuf>("root").ok().flatten() {
        config = config.with_source_root(root);
    }
    if let Some(sections) = args.try_get_one::<PathBuf>("sections").ok().flatten() {
        config = config.with_sections_file(sections);
    }
    if let Some(url) = args.try_get_one::<String>("base-url").ok().flatten() {
        config = config.with_base_url(url);
    }
    Ok(config)
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let wcag2 = Wcag2Catalog::standard();

    match matches.subcommand() {
        Some(("scan", args)) => {
            let config = site_config(matches, args)?;
            let records = commands::scan(&config)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Some(("validate", args)) => {
            let config = site_config(matches, args)?;
            let breaks = commands::validate(&config, &wcag2)?;
            println!("{}", serde_json::to_string_pretty(&breaks)?);
        }
        Some(("check", args)) => {
            let config = site_config(matches, args)?;
            let report = commands::check(&config, &wcag2)?;
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.to_text());
            }
        }
        Some(("render", args)) => {
            let config = site_config(matches, args)?;
            let query = args
                .get_one::<String>("query")
                .context("missing --query")?;
            print!("{}", commands::render(&config, &wcag2, query)?);
        }
        Some((other, _)) => anyhow::bail!("unknown command '{other}'"),
        None => anyhow::bail!("no command given"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    logging::init(matches.get_flag("log-json"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = cli()
            .try_get_matches_from(["breaks", "render", "--query", "v=3", "--log-json"])
            .unwrap();
        assert!(matches.get_flag("log-json"));
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "render");
        assert_eq!(args.get_one::<String>("query").map(String::as_str), Some("v=3"));
    }

    #[test]
    fn flags_override_config() {
        let matches = cli()
            .try_get_matches_from(["breaks", "check", "--root", "site", "--sections", "a.json"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let config = site_config(&matches, args).unwrap();
        assert_eq!(config.source_root, PathBuf::from("site"));
        assert_eq!(config.sections_file, PathBuf::from("a.json"));
    }
}
