// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn a card's GitHub attachments into markdown reference links (pull requests, commits)
// role: render/links
// inputs: Card attachments
// outputs: " - [PR #42](url), [Commit](url)" suffix or empty string
// invariants:
// - Only https://github.com/ URLs qualify; first matching pattern in LINK_PATTERNS wins
// - Unrecognized GitHub URL shapes contribute nothing and never error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::Card;

pub const CODE_HOST_PREFIX: &str = "https://github.com/";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkLabel {
  PullRequest,
  Commit,
}

impl LinkLabel {
  fn render(self, caps: &Captures<'_>, url: &str) -> String {
    match self {
      LinkLabel::PullRequest => {
        let number = caps.name("number").map(|m| m.as_str()).unwrap_or_default();
        format!("[PR #{}]({})", number, url)
      }
      LinkLabel::Commit => format!("[Commit]({})", url),
    }
  }
}

/// Ordered pattern-to-label table; add new URL shapes here.
static LINK_PATTERNS: Lazy<Vec<(Regex, LinkLabel)>> = Lazy::new(|| {
  vec![
    (Regex::new(r"/pull/(?P<number>\d+)").unwrap(), LinkLabel::PullRequest),
    (Regex::new(r"/commit/").unwrap(), LinkLabel::Commit),
  ]
});

/// Classify one attachment URL and render its link, if it is a recognized shape.
pub fn attachment_link(url: &str) -> Option<String> {
  if !url.starts_with(CODE_HOST_PREFIX) {
    return None;
  }

  LINK_PATTERNS
    .iter()
    .find_map(|(re, label)| re.captures(url).map(|caps| label.render(&caps, url)))
}

/// Links for every qualifying attachment, prefixed with " - " when any exist.
pub fn extract_links(card: &Card) -> String {
  let links: Vec<String> = card
    .attachments
    .iter()
    .filter_map(|a| a.url.as_deref())
    .filter_map(attachment_link)
    .collect();

  if links.is_empty() {
    String::new()
  } else {
    format!(" - {}", links.join(", "))
  }
}
