//! Core metadata file parsing (`METADATA`, `PKG-INFO`, `requires.txt`)

/// Fields read from a metadata header block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub name: Option<String>,
    pub version: Option<String>,
    /// Raw `Requires-Dist` values
    pub requires_dist: Vec<String>,
}

/// Parse the header block of a `METADATA` / `PKG-INFO` file
///
/// Headers end at the first blank line; the long description that follows
/// is ignored, as are folded continuation lines.
pub fn parse_metadata(content: &str) -> Metadata {
    let mut metadata = Metadata::default();

    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        if line.starts_with([' ', '\t']) {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_ascii_lowercase().as_str() {
            "name" => metadata.name = Some(value.to_string()),
            "version" => metadata.version = Some(value.to_string()),
            "requires-dist" => metadata.requires_dist.push(value.to_string()),
            _ => {}
        }
    }

    metadata
}

/// Base requirement lines of an egg-info `requires.txt`
///
/// Lines after the first `[section]` header belong to extras or
/// marker-guarded groups and are not returned.
pub fn parse_requires_txt(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with('['))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata() {
        let content = "Metadata-Version: 2.1
Name: requests
Version: 2.31.0
Summary: Python HTTP for Humans.
Requires-Dist: charset-normalizer (<4,>=2)
Requires-Dist: idna (<4,>=2.5)
Requires-Dist: PySocks (!=1.5.7,>=1.5.6) ; extra == 'socks'

Requires-Dist: not-a-header
";
        let metadata = parse_metadata(content);
        assert_eq!(metadata.name.as_deref(), Some("requests"));
        assert_eq!(metadata.version.as_deref(), Some("2.31.0"));
        assert_eq!(metadata.requires_dist.len(), 3);
        assert_eq!(metadata.requires_dist[0], "charset-normalizer (<4,>=2)");
    }

    #[test]
    fn test_parse_metadata_skips_continuation_lines() {
        let content = "Name: demo\nLicense: MIT\n        Permission is hereby granted: yes\nVersion: 0.1\n";
        let metadata = parse_metadata(content);
        assert_eq!(metadata.name.as_deref(), Some("demo"));
        assert_eq!(metadata.version.as_deref(), Some("0.1"));
    }

    #[test]
    fn test_parse_metadata_missing_fields() {
        let metadata = parse_metadata("Summary: nothing useful\n");
        assert!(metadata.name.is_none());
        assert!(metadata.version.is_none());
        assert!(metadata.requires_dist.is_empty());
    }

    #[test]
    fn test_parse_requires_txt() {
        let content = "six>=1.10\n\n# pinned for py2\nsetuptools\n[:python_version < \"3\"]\nfutures\n[test]\npytest\n";
        assert_eq!(parse_requires_txt(content), vec!["six>=1.10", "setuptools"]);
    }
}
