use crate::catalog::Variant;
use crate::report::Reporter;
use anyhow::{Context, Result};
use futures::future;
use std::time::Duration;

/// One successfully retrieved icon: catalog identifier plus raw SVG markup.
#[derive(Debug, Clone)]
pub struct FetchedIcon {
    pub name: String,
    pub svg: String,
}

/// Retrieves icon SVGs in sequential chunks of concurrent requests.
pub struct SvgFetcher {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SvgFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Asset URL for one icon at the fixed 24px size. The identifier is
    /// percent-encoded per segment, so a `/` in a hierarchical name stays a
    /// path separator.
    pub fn asset_url(&self, variant: Variant, name: &str, filled: bool) -> String {
        let encoded = name
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/materialsymbols{}/{}/{}/24px.svg",
            self.base_url,
            variant.as_str(),
            encoded,
            if filled { "fill1" } else { "default" }
        )
    }

    /// Fetch SVG markup for every identifier in `names`.
    ///
    /// Identifiers are processed in contiguous chunks of `chunk_size`;
    /// chunks run strictly one after another, requests within a chunk run
    /// concurrently and are awaited together. A failed retrieval (network
    /// error, timeout, non-2xx) records its URL in `ledger` and yields no
    /// entry; the returned icons keep the input order minus those failures,
    /// so successes plus ledger entries always account for every input.
    pub async fn fetch_all(
        &self,
        names: &[String],
        variant: Variant,
        filled: bool,
        chunk_size: usize,
        ledger: &mut Vec<String>,
        reporter: &dyn Reporter,
    ) -> Vec<FetchedIcon> {
        let total = names.len();
        let chunk_size = chunk_size.max(1);
        let mut fetched = Vec::with_capacity(total);

        for (index, chunk) in names.chunks(chunk_size).enumerate() {
            let done = (index * chunk_size + chunk.len()).min(total);
            reporter.progress(&format!(
                "Extracting {}{} SVG {} out of {}",
                variant.as_str(),
                if filled { "-filled" } else { "" },
                done,
                total
            ));

            let results = future::join_all(chunk.iter().map(|name| async move {
                let url = self.asset_url(variant, name, filled);
                let svg = self.fetch_svg(&url, reporter).await;
                (name.clone(), url, svg)
            }))
            .await;

            for (name, url, svg) in results {
                match svg {
                    Some(svg) => fetched.push(FetchedIcon { name, svg }),
                    None => ledger.push(url),
                }
            }
        }

        fetched
    }

    async fn fetch_svg(&self, url: &str, reporter: &dyn Reporter) -> Option<String> {
        let response = match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                reporter.warning(&format!("Failed to fetch SVG {}: {}", url, e));
                return None;
            }
        };

        if !response.status().is_success() {
            reporter.warning(&format!(
                "Failed to fetch SVG {}: HTTP {}",
                url,
                response.status()
            ));
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                reporter.warning(&format!("Failed to read SVG body {}: {}", url, e));
                None
            }
        }
    }
}
