// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render the markdown report: heading followed by one section per configured list
// role: render/markdown
// inputs: ReportConfig, CardsByList from the card source
// outputs: Report text without trailing newline
// invariants:
// - Sections follow ListConfig order, never fetch order; exactly one section per configured list
// - Same input yields byte-identical output
// - A list with no remaining cards renders the body "None"
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;

use crate::config::{ListConfig, ReportConfig};
use crate::filter::filter_cards;
use crate::links::extract_links;
use crate::model::Card;
use crate::source::CardsByList;

const BLOCK_SEPARATOR: &str = "\n\n";
const EMPTY_SECTION: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
  pub title: String,
  pub lines: Vec<String>,
}

impl fmt::Display for RenderedSection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "*{}*{}", self.title, BLOCK_SEPARATOR)?;
    if self.lines.is_empty() {
      write!(f, "{}", EMPTY_SECTION)
    } else {
      write!(f, "{}", self.lines.join("\n"))
    }
  }
}

pub fn card_line(card: &Card) -> String {
  format!("- {}{}", card.name, extract_links(card))
}

pub fn render_section(list: &ListConfig, cards: &[Card], ignore_archived: bool) -> RenderedSection {
  RenderedSection {
    title: list.display_title().to_string(),
    lines: filter_cards(cards, ignore_archived).into_iter().map(card_line).collect(),
  }
}

pub fn render_report(config: &ReportConfig, cards_by_list: &CardsByList) -> String {
  let sections = config.lists.iter().map(|list| {
    let cards = cards_by_list.get(&list.id).map(Vec::as_slice).unwrap_or_default();
    render_section(list, cards, config.ignore_archived).to_string()
  });

  std::iter::once(config.heading.clone())
    .chain(sections)
    .collect::<Vec<_>>()
    .join(BLOCK_SEPARATOR)
}
