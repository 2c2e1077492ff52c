use crate::types::RepoRef;

const GITHUB_HOST: &str = "github.com";

/// Extracts `owner/repo` from a GitHub repository URL.
///
/// Accepts `https://github.com/<owner>/<repo>` (also `http://` and `www.`),
/// tolerating surrounding whitespace, a trailing slash, extra path segments
/// (`/tree/main/src`) and a trailing `.git`. Anything else yields `None`.
pub fn parse_repo_ref(url: &str) -> Option<RepoRef> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let rest = rest.strip_prefix(GITHUB_HOST)?.strip_prefix('/')?;

    let mut segments = rest.split('/');
    let owner = segments.next().filter(|s| valid_segment(s))?;
    let repo = segments.next()?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if !valid_segment(repo) {
        return None;
    }

    Some(RepoRef {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

fn valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(url: &str) -> Option<(String, String)> {
        parse_repo_ref(url).map(|r| (r.owner, r.repo))
    }

    #[test]
    fn plain_url() {
        assert_eq!(
            pair("https://github.com/acme/widgets"),
            Some(("acme".into(), "widgets".into()))
        );
    }

    #[test]
    fn tolerates_decorations() {
        let expected = Some(("acme".into(), "widgets".into()));
        assert_eq!(pair("  https://github.com/acme/widgets/  "), expected);
        assert_eq!(pair("https://github.com/acme/widgets.git"), expected);
        assert_eq!(pair("https://github.com/acme/widgets/tree/main/src"), expected);
        assert_eq!(pair("https://www.github.com/acme/widgets"), expected);
    }

    #[test]
    fn rejects_non_repo_strings() {
        assert_eq!(pair("not a url"), None);
        assert_eq!(pair("https://gitlab.com/acme/widgets"), None);
        assert_eq!(pair("https://github.com/acme"), None);
        assert_eq!(pair("https://github.com//widgets"), None);
        assert_eq!(pair("github.com/acme/widgets"), None);
    }

    #[test]
    fn display_is_owner_slash_repo() {
        let r = parse_repo_ref("https://github.com/acme/widgets").unwrap();
        assert_eq!(r.to_string(), "acme/widgets");
    }
}
