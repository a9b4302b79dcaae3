//! GitHub web URL parsing.
//!
//! Import accepts the URL shapes a user would paste from the browser:
//!
//! 1. `https://github.com/owner/repo`
//! 2. `https://github.com/owner/repo/tree/branch/path`
//! 3. `https://github.com/owner/repo/blob/branch/file.png` (single-file view,
//!    handled by the raw-host fallback when the API listing fails)
//!
//! Anything with fewer than `{owner, repo}` path segments resolves to
//! nothing rather than an error.

/// Extensions accepted by the import filter.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

/// Where a repository URL points: owner/repo plus an optional ref and
/// subdirectory path from the `tree` view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub owner: String,
    pub repo: String,
    pub reference: String,
    pub path: String,
}

pub fn is_github_url(url: &str) -> bool {
    url.contains("github.com")
}

/// Whether a filename's extension marks it as an image (case-insensitive).
pub fn is_image_file(name: &str) -> bool {
    let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Path portion of a URL: everything after the host, before `?`/`#`.
fn url_path(url: &str) -> &str {
    let after_scheme = match url.find("://") {
        Some(i) => &url[i + 3..],
        None => url,
    };
    let path = match after_scheme.find('/') {
        Some(i) => &after_scheme[i..],
        None => "",
    };
    let path = path.split('?').next().unwrap_or(path);
    path.split('#').next().unwrap_or(path)
}

/// Parse a GitHub web URL into a [`RepoLocator`]. Returns `None` when the
/// path carries fewer than two segments.
pub fn parse_repo_url(url: &str) -> Option<RepoLocator> {
    let segments: Vec<&str> = url_path(url).split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return None;
    }

    let mut locator = RepoLocator {
        owner: segments[0].to_string(),
        repo: segments[1].to_string(),
        reference: String::new(),
        path: String::new(),
    };

    // Tree view carries a ref and an optional subdirectory.
    if segments.get(2) == Some(&"tree") {
        locator.reference = segments.get(3).map(|s| s.to_string()).unwrap_or_default();
        locator.path = segments[4.min(segments.len())..].join("/");
    }

    Some(locator)
}

/// Rewrite a single-file `blob` view URL into its raw-content form:
/// the host becomes `raw_host` and the first `/blob/` segment is dropped.
pub fn blob_to_raw(url: &str, raw_host: &str) -> String {
    url.replacen("github.com", raw_host, 1).replacen("/blob/", "/", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_root_has_empty_ref_and_path() {
        let loc = parse_repo_url("https://github.com/acme/widgets").unwrap();
        assert_eq!(loc.owner, "acme");
        assert_eq!(loc.repo, "widgets");
        assert_eq!(loc.reference, "");
        assert_eq!(loc.path, "");
    }

    #[test]
    fn tree_url_carries_ref_and_path() {
        let loc = parse_repo_url("https://github.com/acme/widgets/tree/main/assets").unwrap();
        assert_eq!(loc.reference, "main");
        assert_eq!(loc.path, "assets");
    }

    #[test]
    fn tree_url_with_nested_path() {
        let loc = parse_repo_url("https://github.com/acme/widgets/tree/dev/img/icons").unwrap();
        assert_eq!(loc.reference, "dev");
        assert_eq!(loc.path, "img/icons");
    }

    #[test]
    fn tree_url_without_branch() {
        let loc = parse_repo_url("https://github.com/acme/widgets/tree").unwrap();
        assert_eq!(loc.reference, "");
        assert_eq!(loc.path, "");
    }

    #[test]
    fn too_short_path_is_none() {
        assert!(parse_repo_url("https://github.com/acme").is_none());
        assert!(parse_repo_url("https://github.com/").is_none());
        assert!(parse_repo_url("https://github.com").is_none());
    }

    #[test]
    fn query_and_fragment_ignored() {
        let loc = parse_repo_url("https://github.com/acme/widgets?tab=readme#top").unwrap();
        assert_eq!(loc.owner, "acme");
        assert_eq!(loc.repo, "widgets");
    }

    #[test]
    fn blob_rewrite_replaces_host_and_drops_blob() {
        let raw = blob_to_raw(
            "https://github.com/acme/widgets/blob/main/logo.png",
            "raw.githubusercontent.com",
        );
        assert_eq!(raw, "https://raw.githubusercontent.com/acme/widgets/main/logo.png");
        assert!(!raw.contains("/blob/"));
    }

    #[test]
    fn image_extension_filter() {
        assert!(is_image_file("photo.JPG"));
        assert!(is_image_file("anim.gif"));
        assert!(is_image_file("vector.svg"));
        assert!(!is_image_file("notes.txt"));
        assert!(!is_image_file("archive.tar.gz"));
    }

    #[test]
    fn github_url_detection() {
        assert!(is_github_url("https://github.com/a/b"));
        assert!(!is_github_url("https://gitlab.com/a/b"));
    }
}
