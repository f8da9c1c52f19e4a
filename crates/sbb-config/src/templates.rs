//! Configuration template for `sbb init`.
//!
//! The template is stored as a valid TOML file and returned as a
//! commented-out example configuration.

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Existing comment lines and empty lines are kept as they are; every other
/// line gets a "# " prefix.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, parse::parse_config};

    #[test]
    fn local_template_parses_as_valid_toml() {
        let result = parse_config(LOCAL_TEMPLATE);
        assert!(result.is_ok(), "local template failed to parse: {result:?}");
    }

    #[test]
    fn local_template_matches_defaults() {
        let raw = parse_config(LOCAL_TEMPLATE).unwrap();
        let defaults = Config::default();
        let index = raw.index.unwrap();
        assert_eq!(index.host.as_deref(), Some(defaults.index.host.as_str()));
        assert_eq!(index.name.as_deref(), Some(defaults.index.name.as_str()));
        let search = raw.search.unwrap();
        assert_eq!(search.page_size, Some(defaults.search.page_size));
        assert_eq!(search.max_page_num, Some(defaults.search.max_page_num));
        let retry = raw.retry.unwrap();
        assert_eq!(retry.count, Some(defaults.retry.count));
    }

    #[test]
    fn rendered_template_is_all_comments() {
        let rendered = local_template();
        assert!(
            rendered
                .lines()
                .all(|line| line.is_empty() || line.starts_with('#'))
        );
        let parsed = parse_config(&rendered).unwrap();
        assert!(parsed.index.is_none());
    }

    #[test]
    fn comment_template_handles_section_headers() {
        let input = "# note\n[section]\nkey = \"value\"\n\n";
        let result = comment_template(input);
        assert_eq!(result, "# note\n# [section]\n# key = \"value\"\n\n");
    }
}
