use crate::report::Reporter;
use fantoccini::{Client, ClientBuilder, Locator};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Visual drawing style of the icon set. Each variant also comes in a
/// filled sub-style, handled as an orthogonal flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    Outlined,
    Rounded,
    Sharp,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Outlined, Variant::Rounded, Variant::Sharp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Outlined => "outlined",
            Variant::Rounded => "rounded",
            Variant::Sharp => "sharp",
        }
    }

    /// Capitalized form used by the catalog page's style filter.
    pub fn capitalized(&self) -> &'static str {
        match self {
            Variant::Outlined => "Outlined",
            Variant::Rounded => "Rounded",
            Variant::Sharp => "Sharp",
        }
    }
}

/// The custom element the catalog page renders one per icon.
const ICON_SELECTOR: &str = "gf-load-icon-font";

/// Delay between scroll rounds while the page lazy-loads more icons.
const SCROLL_DELAY: Duration = Duration::from_secs(2);

/// Upper bound on scroll rounds so an infinitely-loading page still terminates.
const MAX_SCROLLS: u32 = 40;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read manifest {path}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to connect to WebDriver at {url}")]
    Connect {
        url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    #[error("catalog page scrape failed")]
    Scrape(#[from] fantoccini::error::CmdError),

    #[error("failed to build WebDriver client: {0}")]
    Client(String),
}

#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Cached catalog manifest; its presence skips scraping entirely.
    pub manifest_path: PathBuf,
    /// WebDriver endpoint (chromedriver) for the live-scrape path.
    pub webdriver_url: String,
    /// Catalog page base URL.
    pub catalog_url: String,
    /// Deadline for navigation and for the initial element wait.
    pub timeout: Duration,
}

/// List every icon identifier the catalog publishes for `variant`.
///
/// If the manifest cache exists its top-level keys are the catalog and no
/// network access happens; a malformed manifest is fatal rather than a
/// fallthrough to scraping. Otherwise a headless browser session is opened,
/// scrolled until the lazy-loaded icon list stops growing, and read out.
pub async fn icon_list(
    variant: Variant,
    opts: &CatalogOptions,
    reporter: &dyn Reporter,
) -> Result<Vec<String>, CatalogError> {
    if opts.manifest_path.exists() {
        reporter.progress(&format!(
            "Reading catalog from {}",
            opts.manifest_path.display()
        ));
        return manifest_icon_list(&opts.manifest_path);
    }

    reporter.progress(&format!(
        "Scraping {} catalog from {}",
        variant.as_str(),
        opts.catalog_url
    ));

    let client = connect(&opts.webdriver_url).await?;
    // The session must come down on the failure path too.
    let result = scrape(&client, variant, opts).await;
    if let Err(e) = client.close().await {
        reporter.warning(&format!("Failed to close WebDriver session: {}", e));
    }
    result
}

/// Shape of the cached manifest: a JSON object with one top-level key per
/// icon identifier. The per-icon metadata values are not interpreted.
#[derive(serde::Deserialize)]
#[serde(transparent)]
struct Manifest {
    entries: serde_json::Map<String, serde_json::Value>,
}

/// Read the catalog out of the cached manifest: its top-level keys are the
/// icon identifiers, returned in the map's (sorted) key order.
fn manifest_icon_list(path: &Path) -> Result<Vec<String>, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: Manifest =
        serde_json::from_str(&raw).map_err(|source| CatalogError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(manifest.entries.keys().cloned().collect())
}

async fn connect(webdriver_url: &str) -> Result<Client, CatalogError> {
    let mut caps = serde_json::map::Map::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        serde_json::json!({ "args": ["--headless=new", "--no-sandbox", "--disable-gpu"] }),
    );

    ClientBuilder::rustls()
        .map_err(|e| CatalogError::Client(e.to_string()))?
        .capabilities(caps)
        .connect(webdriver_url)
        .await
        .map_err(|source| CatalogError::Connect {
            url: webdriver_url.to_string(),
            source,
        })
}

async fn scrape(
    client: &Client,
    variant: Variant,
    opts: &CatalogOptions,
) -> Result<Vec<String>, CatalogError> {
    client
        .update_timeouts(fantoccini::wd::TimeoutConfiguration::new(
            None,
            Some(opts.timeout),
            None,
        ))
        .await?;

    let url = format!("{}?icon.style={}", opts.catalog_url, variant.capitalized());
    client.goto(&url).await?;

    client
        .wait()
        .at_most(opts.timeout)
        .for_element(Locator::Css(ICON_SELECTOR))
        .await?;

    scroll_to_load_icons(client).await?;

    let loaded = client
        .execute(
            &format!(
                "return Array.from(document.querySelectorAll('{}')).map(e => (e.textContent || '').trim());",
                ICON_SELECTOR
            ),
            vec![],
        )
        .await?;

    let names = loaded
        .as_array()
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(names)
}

/// Scroll to the bottom until the loaded icon count stops growing. The page
/// lazy-loads on scroll, so each round scrolls, waits a fixed delay, and
/// polls the count; a plateau after the first round ends the loop.
async fn scroll_to_load_icons(client: &Client) -> Result<(), CatalogError> {
    let mut previous = 0u64;

    for round in 0..MAX_SCROLLS {
        let count = loaded_icon_count(client).await?;

        if count > previous {
            previous = count;
        } else if round > 0 {
            break;
        }

        client
            .execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await?;
        tokio::time::sleep(SCROLL_DELAY).await;
    }

    Ok(())
}

async fn loaded_icon_count(client: &Client) -> Result<u64, CatalogError> {
    let value = client
        .execute(
            &format!(
                "return document.querySelectorAll('{}').length;",
                ICON_SELECTOR
            ),
            vec![],
        )
        .await?;

    Ok(value.as_u64().unwrap_or(0))
}
