use clap::{Parser, Subcommand};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use site_4via6_routes::config::{host_bits_from_env, OutputFormat, Settings};
use site_4via6_routes::output::{
    manifests_json, print_site_summary, report_json, routes_print, RouteReport,
};
use site_4via6_routes::processing::build_site_routes;
use site_4via6_routes::{decode_4via6, derive_4via6_with, get_sorted_sites, HostBits};
use std::error::Error;
use std::path::Path;

const LOG_CONFIG_FILE: &str = "log4rs.yml";

#[derive(Parser)]
#[command(author, version, about = "Derive 4via6 routes for deployment sites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the 4via6 prefix for one site id and IPv4 CIDR.
    Derive {
        #[arg(short, long, allow_negative_numbers = true, help = "Site id, 0-65535")]
        site: i64,

        #[arg(short, long, help = "IPv4 CIDR, e.g. 10.100.0.0/16")]
        cidr: String,

        #[arg(long, help = "Reject CIDRs with host bits set")]
        strict: bool,
    },
    /// Build router configuration for every site in a site file.
    Routes {
        #[arg(short, long, help = "Site file (default: $SITES_FILE or sites.json)")]
        sites: Option<String>,

        #[arg(short, long, value_enum, help = "Output format (default: $OUTPUT_FORMAT or csv)")]
        format: Option<OutputFormat>,

        #[arg(long, help = "Reject CIDRs with host bits set")]
        strict: bool,

        #[arg(long, help = "Also print a one-line summary per site")]
        summary: bool,
    },
    /// Print the site id and IPv4 network inside a 4via6 prefix.
    Decode {
        #[arg(help = "4via6 prefix, e.g. fd7a:115c:a1e0:b1a:0:1:0a64:0000/112")]
        prefix: String,
    },
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    if Path::new(LOG_CONFIG_FILE).exists() {
        log4rs::init_file(LOG_CONFIG_FILE, Default::default())?;
        return Ok(());
    }

    // Logs go to stderr so stdout stays clean for route output.
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging()?;
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    log::info!("#Start main()");

    if let Err(e) = run(cli) {
        log::error!("{e}");
        return Err(e);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Derive { site, cidr, strict } => {
            let host_bits = if strict {
                HostBits::Reject
            } else {
                host_bits_from_env()?
            };
            let prefix = derive_4via6_with(site, cidr.trim(), host_bits)?;
            println!("{prefix}");
        }
        Command::Routes {
            sites,
            format,
            strict,
            summary,
        } => {
            let settings = Settings::from_env()?;
            let sites_file = sites.unwrap_or(settings.sites_file);
            let host_bits = if strict {
                HostBits::Reject
            } else {
                settings.host_bits
            };

            let site_file = get_sorted_sites(Some(sites_file.as_str()))?;
            let routes = build_site_routes(&site_file, host_bits)?;

            match format.unwrap_or(settings.output_format) {
                OutputFormat::Csv => routes_print(&routes),
                OutputFormat::Json => {
                    println!("{}", report_json(&RouteReport::new(&routes, host_bits))?)
                }
                OutputFormat::Manifest => println!("{}", manifests_json(&routes)?),
            }
            if summary {
                print_site_summary(&routes);
            }
        }
        Command::Decode { prefix } => {
            let (site, network) = decode_4via6(prefix.trim())?;
            println!("site_id={site} ipv4={network}");
        }
    }

    Ok(())
}
