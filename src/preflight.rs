use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::model::BoardList;
use crate::source::trello_api::BoardApi;

/// Verify configured lists against the board before fetching cards.
///
/// Missing lists are logged; having none of them on the board is an error.
pub fn check_board_lists(api: &dyn BoardApi, config: &ReportConfig) -> Result<(), ReportError> {
  let on_board = api.lists_on_board(&config.board_id)?;
  let mut found = 0usize;

  for list in &config.lists {
    match on_board.iter().find(|b| b.id == list.id) {
      Some(b) => {
        found += 1;
        if b.closed {
          tracing::warn!(list = %list.id, name = %b.name, "configured list is archived on the board");
        }
      }
      None => tracing::warn!(list = %list.id, name = %list.name, "configured list not found on board"),
    }
  }

  if found == 0 {
    return Err(ReportError::NoConfiguredListsOnBoard);
  }

  Ok(())
}

/// One `<id>\t<name>` line per open list, in board order.
pub fn format_board_lists(lists: &[BoardList]) -> String {
  lists
    .iter()
    .filter(|l| !l.closed)
    .map(|l| format!("{}\t{}", l.id, l.name))
    .collect::<Vec<_>>()
    .join("\n")
}
