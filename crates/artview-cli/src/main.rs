mod catalog;
mod detect;
mod verify_images;

use artview_catalog::{ContentClient, Selector, SiteLinks, VariantResolver};
use artview_core::AppConfig;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "artview-cli")]
#[command(about = "Artwork previewer command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Product selector shared by the catalog sub-commands.
#[derive(Debug, Args)]
struct SelectorArgs {
    /// Artwork slug (e.g. madness-is-genius)
    #[arg(long)]
    slug: Option<String>,

    /// Variant SKU; alone it resolves the whole product it belongs to
    #[arg(long)]
    sku: Option<String>,
}

impl SelectorArgs {
    fn to_selector(&self) -> Selector {
        Selector {
            slug: self.slug.clone(),
            sku: self.sku.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a product and list its variants
    Resolve {
        #[command(flatten)]
        selector: SelectorArgs,

        /// Print the product as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compute the placement of the selected variant
    Place {
        #[command(flatten)]
        selector: SelectorArgs,

        /// Use immersive (AR) placement instead of the preview
        #[arg(long)]
        presenting: bool,
    },
    /// Classify a client environment without contacting the content store
    Detect {
        /// User agent string to classify
        #[arg(long, default_value = "")]
        user_agent: String,

        /// Browser vendor string, used when the user agent is empty
        #[arg(long)]
        vendor: Option<String>,

        /// Page query string (e.g. "forceMode=3d")
        #[arg(long)]
        query: Option<String>,

        /// Report that the AR session capability object is present
        #[arg(long)]
        xr: bool,
    },
    /// Check that every variant image of a product loads as a texture
    VerifyImages {
        #[command(flatten)]
        selector: SelectorArgs,

        /// Maximum number of image checks in flight (defaults to config)
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

/// Log filter used when no configuration is loaded (the `detect` command).
const DEFAULT_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Resolve { selector, json }) => {
            let config = load_config_with_tracing()?;
            let resolver = build_resolver(&config)?;
            catalog::run_resolve(&resolver, &selector.to_selector(), json).await?;
        }
        Some(Commands::Place {
            selector,
            presenting,
        }) => {
            let config = load_config_with_tracing()?;
            let resolver = build_resolver(&config)?;
            catalog::run_place(
                &resolver,
                &config.calibration,
                &selector.to_selector(),
                presenting,
            )
            .await?;
        }
        Some(Commands::Detect {
            user_agent,
            vendor,
            query,
            xr,
        }) => {
            dotenvy::dotenv().ok();
            init_tracing(DEFAULT_LOG_LEVEL)?;
            detect::run_detect(user_agent, vendor, query, xr)?;
        }
        Some(Commands::VerifyImages {
            selector,
            concurrency,
        }) => {
            let config = load_config_with_tracing()?;
            let resolver = build_resolver(&config)?;
            verify_images::run_verify_images(
                &resolver,
                &selector.to_selector(),
                concurrency.unwrap_or(config.preload_concurrency),
            )
            .await?;
        }
        None => println!("artview-cli: no command given; see --help"),
    }

    Ok(())
}

/// Loads configuration (including `.env`) and installs the subscriber with
/// the configured log level as the fallback filter.
fn load_config_with_tracing() -> anyhow::Result<AppConfig> {
    let config = artview_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    Ok(config)
}

fn init_tracing(configured_level: &str) -> anyhow::Result<()> {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), configured_level);
    let env_filter = EnvFilter::try_new(directive)?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

/// `RUST_LOG` wins when set and non-blank; otherwise the configured level.
fn filter_directive(rust_log: Option<String>, configured_level: &str) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| configured_level.to_owned())
}

fn build_resolver(config: &AppConfig) -> anyhow::Result<VariantResolver> {
    let client = ContentClient::new(
        &config.content_endpoint,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    Ok(VariantResolver::new(
        client,
        SiteLinks::new(&config.site_root),
    ))
}
