use crate::model::Card;

/// Drop archived cards when `ignore_archived` is set; otherwise keep everything.
/// Order is preserved.
pub fn filter_cards(cards: &[Card], ignore_archived: bool) -> Vec<&Card> {
  cards.iter().filter(|c| !(ignore_archived && c.archived)).collect()
}
