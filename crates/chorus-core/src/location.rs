//! Stores — the places feedback can be attributed to.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, feedback::check_len};

/// Upper bound on `name` and `area`, in characters.
pub const MAX_STORE_FIELD_LEN: usize = 200;

/// A registered store, optionally grouped into an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
  pub id:   i64,
  pub name: String,
  pub area: Option<String>,
}

/// Input to [`crate::store::FeedbackStore::add_store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
  pub name: String,
  pub area: Option<String>,
}

impl NewStore {
  pub fn new(name: Option<String>, area: Option<String>) -> Result<Self> {
    let name = name.ok_or(Error::MissingField("name"))?;
    check_len("name", &name, MAX_STORE_FIELD_LEN)?;
    if let Some(area) = &area {
      check_len("area", area, MAX_STORE_FIELD_LEN)?;
    }
    Ok(Self { name, area })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn name_is_required() {
    let err = NewStore::new(None, Some("Downtown".into())).unwrap_err();
    assert!(matches!(err, Error::MissingField("name")));
  }

  #[test]
  fn area_is_optional_but_bounded() {
    assert!(NewStore::new(Some("Main St".into()), None).is_ok());
    let err = NewStore::new(
      Some("Main St".into()),
      Some("x".repeat(MAX_STORE_FIELD_LEN + 1)),
    )
    .unwrap_err();
    assert!(matches!(err, Error::FieldTooLong { field: "area", .. }));
  }
}
