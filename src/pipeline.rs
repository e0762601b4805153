use crate::catalog::{self, CatalogOptions, Variant};
use crate::emit::{self, IndexEntry};
use crate::extract;
use crate::fetch::{FetchedIcon, SvgFetcher};
use crate::naming;
use crate::report::Reporter;
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

pub struct GenerateOptions {
    /// Root of the generated file tree.
    pub icons_dir: PathBuf,
    /// Icons fetched concurrently per chunk.
    pub chunk_size: usize,
    /// Asset base URL for the vector files.
    pub base_url: String,
    /// Per-request fetch timeout.
    pub timeout: Duration,
    pub catalog: CatalogOptions,
}

/// Generate component files for every variant (or just `only`), both
/// unfilled and filled. One variant failing is reported and the others still
/// run; the call errors at the end so the process exits non-zero.
pub async fn run_generate(
    opts: &GenerateOptions,
    only: Option<Variant>,
    reporter: &dyn Reporter,
) -> Result<()> {
    let fetcher = SvgFetcher::new(&opts.base_url, opts.timeout)?;
    let mut ledger = Vec::new();
    let mut written = 0usize;
    let mut failed_variants = Vec::new();

    let variants: Vec<Variant> = match only {
        Some(variant) => vec![variant],
        None => Variant::ALL.to_vec(),
    };

    for variant in variants {
        match generate_variant(&fetcher, variant, opts, &mut ledger, reporter).await {
            Ok(count) => written += count,
            Err(e) => {
                reporter.error(&format!(
                    "Failed to generate {} variants: {:#}",
                    variant.as_str(),
                    e
                ));
                failed_variants.push(variant);
            }
        }
    }

    for url in &ledger {
        reporter.warning(&format!("No SVG retrieved from {}", url));
    }

    if !failed_variants.is_empty() {
        anyhow::bail!(
            "{} of {} variant runs failed",
            failed_variants.len(),
            if only.is_some() { 1 } else { Variant::ALL.len() }
        );
    }

    reporter.progress(&format!("\nDone! {} components written.", written));
    Ok(())
}

/// One variant's full run: catalog once, then fetch and emit the unfilled
/// and filled styles from the same identifier list.
async fn generate_variant(
    fetcher: &SvgFetcher,
    variant: Variant,
    opts: &GenerateOptions,
    ledger: &mut Vec<String>,
    reporter: &dyn Reporter,
) -> Result<usize> {
    let names = catalog::icon_list(variant, &opts.catalog, reporter).await?;
    reporter.progress(&format!("Found {} {} icons", names.len(), variant.as_str()));

    check_collisions(&names)?;

    let mut written = 0;
    for filled in [false, true] {
        let fetched = fetcher
            .fetch_all(&names, variant, filled, opts.chunk_size, ledger, reporter)
            .await;

        let mut dir = opts.icons_dir.join(variant.as_str());
        if filled {
            dir = dir.join("filled");
        }
        written += emit_components(&fetched, &dir, filled, reporter)?;
    }

    Ok(written)
}

/// Two distinct catalog entries normalizing to the same component name would
/// silently overwrite each other, so that is a hard failure.
fn check_collisions(names: &[String]) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for name in names {
        let normalized = naming::normalize(name);
        if let Some(existing) = seen.insert(normalized.clone(), name) {
            anyhow::bail!(
                "catalog entries {:?} and {:?} both normalize to {:?}",
                existing,
                name,
                normalized
            );
        }
    }

    Ok(())
}

/// Write one component file per fetched icon. Extraction and write failures
/// skip just that icon.
pub fn emit_components(
    fetched: &[FetchedIcon],
    dir: &Path,
    filled: bool,
    reporter: &dyn Reporter,
) -> Result<usize> {
    let mut written = 0;

    for icon in fetched {
        let Some(path_data) = extract::path_data(&icon.svg) else {
            reporter.warning(&format!(
                "No 'd' attribute found in the <path> element for {}",
                icon.name
            ));
            continue;
        };

        let name = naming::normalize(&icon.name);
        match emit::write_component(dir, &name, &path_data, filled) {
            Ok(_) => written += 1,
            Err(e) => reporter.warning(&format!("Failed to write {}: {:#}", name, e)),
        }
    }

    Ok(written)
}

/// Write the per-directory aggregators: one `index.tsx` in each variant
/// directory and its `filled/` subdirectory, plus the top-level one that
/// re-exports the wrapper set (named after the outlined components).
pub fn run_indexes(icons_dir: &Path, reporter: &dyn Reporter) -> Result<()> {
    let mut count = 0;

    for variant in Variant::ALL {
        let dir = icons_dir.join(variant.as_str());
        write_directory_index(&dir)?;
        write_directory_index(&dir.join("filled"))?;
        count += 2;
    }

    let entries = index_entries(&icons_dir.join("outlined"))?;
    emit::write_index(&icons_dir.join("index.tsx"), &entries)?;
    count += 1;

    reporter.progress(&format!("Generated {} index files.", count));
    Ok(())
}

/// Write one lazy-loading wrapper per logical icon, named after the
/// outlined component set, into the tree root.
pub fn run_wrappers(icons_dir: &Path, reporter: &dyn Reporter) -> Result<()> {
    let entries = index_entries(&icons_dir.join("outlined"))?;

    for entry in &entries {
        emit::write_wrapper(icons_dir, &entry.name)?;
    }

    reporter.progress(&format!("Generated {} wrappers.", entries.len()));
    Ok(())
}

fn write_directory_index(dir: &Path) -> Result<()> {
    let entries = index_entries(dir)?;
    emit::write_index(&dir.join("index.tsx"), &entries)
}

/// Scan a directory's component files into index entries, sorted by
/// filename so regeneration is deterministic.
fn index_entries(dir: &Path) -> Result<Vec<IndexEntry>> {
    let files = component_files(dir)?;

    Ok(files
        .iter()
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()))
        .map(|stem| IndexEntry {
            name: naming::normalize(stem),
            path: format!("./{}", stem),
        })
        .collect())
}

/// Top-level `.tsx` files in a directory, excluding the aggregator itself.
fn component_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension().map(|ext| ext == "tsx").unwrap_or(false)
                && p.file_name().map(|f| f != "index.tsx").unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::Recording;

    fn fetched(name: &str, d: &str) -> FetchedIcon {
        FetchedIcon {
            name: name.to_string(),
            svg: format!("<svg><path d=\"{}\"/></svg>", d),
        }
    }

    #[test]
    fn test_emit_components_skips_bad_markup() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Recording::default();

        let icons = vec![
            fetched("home", "M480-160"),
            FetchedIcon {
                name: "broken".to_string(),
                svg: "<svg><rect/></svg>".to_string(),
            },
            fetched("3d_rotation", "M100-200"),
        ];

        let written = emit_components(&icons, dir.path(), false, &reporter).unwrap();
        assert_eq!(written, 2);
        assert!(dir.path().join("Home.tsx").exists());
        assert!(dir.path().join("ThreeDRotation.tsx").exists());
        assert!(!dir.path().join("Broken.tsx").exists());

        let warnings = reporter.lines("warning");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("broken"));
    }

    #[test]
    fn test_collision_detection() {
        // teen spellings keep "13" and "1_3" distinct
        let ok = vec!["13".to_string(), "1_3".to_string()];
        assert!(check_collisions(&ok).is_ok());

        let clash = vec!["ac_unit".to_string(), "ac/unit".to_string()];
        // "ac/unit" keeps its slash, so it does not collide with "ac_unit"
        assert!(check_collisions(&clash).is_ok());

        // a spelled-out number and its digits normalize identically
        let dup = vec!["ten".to_string(), "10".to_string()];
        let err = check_collisions(&dup).unwrap_err();
        assert!(err.to_string().contains("Ten"));
    }

    #[test]
    fn test_run_indexes_builds_every_aggregator() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Recording::default();

        for variant in Variant::ALL {
            let base = dir.path().join(variant.as_str());
            std::fs::create_dir_all(base.join("filled")).unwrap();
            std::fs::write(base.join("Home.tsx"), "x").unwrap();
            std::fs::write(base.join("filled").join("Home.tsx"), "x").unwrap();
        }

        run_indexes(dir.path(), &reporter).unwrap();

        for variant in Variant::ALL {
            assert!(dir.path().join(variant.as_str()).join("index.tsx").exists());
            assert!(dir
                .path()
                .join(variant.as_str())
                .join("filled")
                .join("index.tsx")
                .exists());
        }

        let top = std::fs::read_to_string(dir.path().join("index.tsx")).unwrap();
        assert!(top.contains("import Home from './Home';"));
        assert!(top.contains("  Home,\n"));
    }

    #[test]
    fn test_run_indexes_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Recording::default();

        for variant in Variant::ALL {
            let base = dir.path().join(variant.as_str());
            std::fs::create_dir_all(base.join("filled")).unwrap();
            std::fs::write(base.join("AcUnit.tsx"), "x").unwrap();
            std::fs::write(base.join("ThreeDRotation.tsx"), "x").unwrap();
        }

        run_indexes(dir.path(), &reporter).unwrap();
        let first = std::fs::read_to_string(dir.path().join("outlined/index.tsx")).unwrap();
        run_indexes(dir.path(), &reporter).unwrap();
        let second = std::fs::read_to_string(dir.path().join("outlined/index.tsx")).unwrap();
        assert_eq!(first, second);
        // sorted scan: AcUnit before ThreeDRotation
        assert!(first.find("AcUnit").unwrap() < first.find("ThreeDRotation").unwrap());
    }

    #[test]
    fn test_run_wrappers_covers_outlined_set() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Recording::default();

        let outlined = dir.path().join("outlined");
        std::fs::create_dir_all(&outlined).unwrap();
        std::fs::write(outlined.join("Home.tsx"), "x").unwrap();
        std::fs::write(outlined.join("ThreeDRotation.tsx"), "x").unwrap();
        std::fs::write(outlined.join("index.tsx"), "x").unwrap();

        run_wrappers(dir.path(), &reporter).unwrap();

        assert!(dir.path().join("Home.tsx").exists());
        assert!(dir.path().join("ThreeDRotation.tsx").exists());
        // the aggregator is not a component and gets no wrapper
        assert!(!dir.path().join("Index.tsx").exists());
        assert_eq!(reporter.lines("progress"), vec!["Generated 2 wrappers."]);
    }

    #[tokio::test]
    async fn test_end_to_end_outlined_generation() {
        let base = crate::fetch::test_support::spawn_svg_server().await;
        let fetcher = SvgFetcher::new(&base, Duration::from_secs(10)).unwrap();
        let reporter = Recording::default();
        let mut ledger = Vec::new();

        let catalog = vec!["home".to_string(), "3d_rotation".to_string()];
        let fetched = fetcher
            .fetch_all(
                &catalog,
                Variant::Outlined,
                false,
                1,
                &mut ledger,
                &reporter,
            )
            .await;

        // chunk size 1 over two icons: two sequential fetch rounds
        assert_eq!(
            reporter.lines("progress"),
            vec![
                "Extracting outlined SVG 1 out of 2",
                "Extracting outlined SVG 2 out of 2",
            ]
        );
        assert!(ledger.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let outlined = dir.path().join("outlined");
        let written = emit_components(&fetched, &outlined, false, &reporter).unwrap();
        assert_eq!(written, 2);
        assert!(outlined.join("Home.tsx").exists());
        assert!(outlined.join("ThreeDRotation.tsx").exists());

        write_directory_index(&outlined).unwrap();
        let index = std::fs::read_to_string(outlined.join("index.tsx")).unwrap();
        assert_eq!(
            index,
            "import Home from './Home';\n\
             import ThreeDRotation from './ThreeDRotation';\n\
             \nexport {\n  Home,\n  ThreeDRotation,\n};\n"
        );
    }

    #[test]
    fn test_missing_directory_fails_index_run() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Recording::default();
        assert!(run_indexes(dir.path(), &reporter).is_err());
    }
}
