// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the Trello wire model (lists, cards, attachments, actions) consumed by the report pipeline
// role: model/types
// outputs: Deserializable structs with Trello's camelCase field names mapped to snake_case
// invariants: Unknown fields are ignored; optional wire fields default instead of failing the whole payload
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BoardList {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub closed: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Attachment {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Card {
  pub id: String,
  pub name: String,
  #[serde(rename = "idList")]
  pub id_list: String,
  /// Archived on the board (`closed` on the wire).
  #[serde(rename = "closed", default)]
  pub archived: bool,
  #[serde(default)]
  pub attachments: Vec<Attachment>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CardRef {
  pub id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ActionData {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub card: Option<CardRef>,
}

/// One entry of a board's action history. Only the card reference matters here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Action {
  #[serde(default)]
  pub id: String,
  #[serde(rename = "type", default)]
  pub kind: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date: Option<String>,
  #[serde(default)]
  pub data: ActionData,
}

impl Action {
  pub fn card_id(&self) -> Option<&str> {
    self.data.card.as_ref().map(|c| c.id.as_str()).filter(|id| !id.is_empty())
  }
}
