use regex::Regex;
use std::sync::OnceLock;

/// Pull the `d` attribute out of the first `<path>` element in an SVG
/// document. Returns `None` when no path with a `d` attribute exists.
///
/// A single scan is enough here: the fetched 24px icon documents hold one
/// path each, and attribute order on the tag is not guaranteed.
pub fn path_data(svg: &str) -> Option<String> {
    static PATH_RE: OnceLock<Regex> = OnceLock::new();
    let re = PATH_RE.get_or_init(|| {
        Regex::new(r#"(?i)<path[^>]*\sd="([^"]*)""#).expect("valid path regex")
    });

    re.captures(svg)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_d_attribute() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M480-160v-320Z"/></svg>"#;
        assert_eq!(path_data(svg), Some("M480-160v-320Z".to_string()));
    }

    #[test]
    fn test_tolerates_attribute_order() {
        let svg = r#"<svg><path fill="none" stroke-width="2" d="M10 10h4" opacity="0.5"/></svg>"#;
        assert_eq!(path_data(svg), Some("M10 10h4".to_string()));

        let svg = r#"<svg><path d="M1 1" fill="red"/></svg>"#;
        assert_eq!(path_data(svg), Some("M1 1".to_string()));
    }

    #[test]
    fn test_trims_whitespace() {
        let svg = r#"<path d="  M480-160v-320  "/>"#;
        assert_eq!(path_data(svg), Some("M480-160v-320".to_string()));
    }

    #[test]
    fn test_case_insensitive_tag() {
        let svg = r#"<PATH D="M0 0"/>"#;
        assert_eq!(path_data(svg), Some("M0 0".to_string()));
    }

    #[test]
    fn test_first_path_wins() {
        let svg = r#"<path d="first"/><path d="second"/>"#;
        assert_eq!(path_data(svg), Some("first".to_string()));
    }

    #[test]
    fn test_missing_path_returns_none() {
        assert_eq!(path_data("<svg><rect width=\"4\"/></svg>"), None);
        assert_eq!(path_data(""), None);
        assert_eq!(path_data("<path stroke=\"red\"/>"), None);
    }
}
