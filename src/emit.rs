use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// One line of an index file: import identifier plus its relative module path.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub name: String,
    pub path: String,
}

/// Render a self-contained icon component embedding `path_data` in the fixed
/// 24px viewport. Caller props are spread over the svg element so size and
/// color can be overridden at the call site.
pub fn component_source(name: &str, path_data: &str, filled: bool) -> String {
    // `types` sits at the tree root, one level above the variant directory;
    // the filled subdirectory and every `/` in a hierarchical name each nest
    // the file one level deeper.
    let depth = 1 + usize::from(filled) + name.matches('/').count();
    let types_path = format!("{}types", "../".repeat(depth));
    // Hierarchical names keep their path in the file tree but the code
    // identifier is the leaf segment.
    let ident = identifier(name);

    format!(
        r#"import React from "react";
import {{ IconProps }} from "{types_path}";

export const {ident} = (props: IconProps) => (
  <svg xmlns="http://www.w3.org/2000/svg" height="24" width="24" viewBox="0 -960 960 960" fill="currentColor" {{...props}}>
    <path d="{path_data}" />
  </svg>
);

export default {ident};
"#
    )
}

/// Write one component file at `<dir>/<name>.tsx`, creating parent
/// directories as needed. Whole-content write, so a rerun overwrites cleanly.
pub fn write_component(dir: &Path, name: &str, path_data: &str, filled: bool) -> Result<PathBuf> {
    let file_path = dir.join(format!("{}.tsx", name));
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&file_path, component_source(name, path_data, filled))
        .with_context(|| format!("Failed to write {}", file_path.display()))?;

    Ok(file_path)
}

/// Render an aggregator that imports every entry and re-exports all of them
/// in one named-export block. Output is a pure function of the entry order.
pub fn index_source(entries: &[IndexEntry]) -> String {
    let mut source = String::new();

    for entry in entries {
        source.push_str(&format!(
            "import {} from '{}';\n",
            identifier(&entry.name),
            entry.path
        ));
    }

    source.push_str("\nexport {\n");
    for entry in entries {
        source.push_str(&format!("  {},\n", identifier(&entry.name)));
    }
    source.push_str("};\n");

    source
}

pub fn write_index(dest: &Path, entries: &[IndexEntry]) -> Result<()> {
    std::fs::write(dest, index_source(entries))
        .with_context(|| format!("Failed to write {}", dest.display()))
}

/// Render the lazy-loading wrapper for one logical icon.
///
/// Each of the six variant/fill combinations maps to its own dynamic-import
/// loader; a module-level cache memoizes one `React.lazy` handle per
/// combination, so the first render of a combination suspends while it loads
/// and later renders (or a switch back to an earlier combination) reuse the
/// cached handle.
pub fn wrapper_source(name: &str) -> String {
    WRAPPER_TEMPLATE.replace("{name}", identifier(name))
}

const WRAPPER_TEMPLATE: &str = r#"import React from 'react';
import { IconProps, IconWrapperProps } from './types';

type LazyIconProps = Omit<IconProps, 'ref'>;
type LazyIcon = React.LazyExoticComponent<React.ComponentType<LazyIconProps>>;

const loaders: Record<string, () => Promise<{ default: React.ComponentType<LazyIconProps> }>> = {
  'outlined': () => import('./outlined/{name}'),
  'outlined/filled': () => import('./outlined/filled/{name}'),
  'rounded': () => import('./rounded/{name}'),
  'rounded/filled': () => import('./rounded/filled/{name}'),
  'sharp': () => import('./sharp/{name}'),
  'sharp/filled': () => import('./sharp/filled/{name}'),
};

const cache = new Map<string, LazyIcon>();

const iconFor = (variant: IconWrapperProps['variant'] = 'outlined', filled?: boolean): LazyIcon => {
  const key = filled ? variant + '/filled' : variant;
  let icon = cache.get(key);
  if (!icon) {
    icon = React.lazy(loaders[key]);
    cache.set(key, icon);
  }
  return icon;
};

export const {name} = (props: IconWrapperProps) => {
  const { variant = 'outlined', filled, ...iconProps } = props;
  const LazyIcon = iconFor(variant, filled);

  return (
    <React.Suspense fallback={null}>
      <LazyIcon {...(iconProps as LazyIconProps)} />
    </React.Suspense>
  );
};

export default {name};
"#;

pub fn write_wrapper(dir: &Path, name: &str) -> Result<PathBuf> {
    let file_path = dir.join(format!("{}.tsx", name));
    std::fs::write(&file_path, wrapper_source(name))
        .with_context(|| format!("Failed to write {}", file_path.display()))?;
    Ok(file_path)
}

fn identifier(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
