//! Open Trivia DB category vocabulary: display names to numeric transport ids.

use serde::{Serialize, Serializer};

/// Category filter for a quiz attempt. `Any` sends no category to the bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Category {
  #[default]
  Any,
  Named(CategoryId),
}

/// A bank category id known to be in `CATEGORIES`. Only built through
/// `Category::from_id`/`from_name`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CategoryId(u8);

/// (transport id, display name); ids are contiguous 9..=32.
pub const CATEGORIES: [(u8, &str); 24] = [
  (9, "General Knowledge"),
  (10, "Entertainment: Books"),
  (11, "Entertainment: Film"),
  (12, "Entertainment: Music"),
  (13, "Entertainment: Musicals & Theatres"),
  (14, "Entertainment: Television"),
  (15, "Entertainment: Video Games"),
  (16, "Entertainment: Board Games"),
  (17, "Science & Nature"),
  (18, "Science: Computers"),
  (19, "Science: Mathematics"),
  (20, "Mythology"),
  (21, "Sports"),
  (22, "Geography"),
  (23, "History"),
  (24, "Politics"),
  (25, "Art"),
  (26, "Celebrities"),
  (27, "Animals"),
  (28, "Vehicles"),
  (29, "Entertainment: Comics"),
  (30, "Science: Gadgets"),
  (31, "Entertainment: Japanese Anime & Manga"),
  (32, "Entertainment: Cartoon & Animations"),
];

impl Category {
  /// Look up by display name (case-insensitive), `"any"`, or numeric id.
  pub fn from_name(name: &str) -> Option<Self> {
    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case("any") {
      return Some(Category::Any);
    }
    if let Ok(id) = name.parse::<u8>() {
      return Self::from_id(id);
    }
    CATEGORIES
      .iter()
      .find(|(_, n)| n.eq_ignore_ascii_case(name))
      .map(|(id, _)| Category::Named(CategoryId(*id)))
  }

  pub fn from_id(id: u8) -> Option<Self> {
    CATEGORIES.iter().any(|(i, _)| *i == id).then_some(Category::Named(CategoryId(id)))
  }

  /// Transport-level id; `None` for `Any`.
  pub fn id(&self) -> Option<u8> {
    match self {
      Category::Any => None,
      Category::Named(CategoryId(id)) => Some(*id),
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Category::Any => "any",
      // `CategoryId` is always a table id, so the lookup cannot miss.
      Category::Named(CategoryId(id)) => CATEGORIES
        .iter()
        .find(|(i, _)| i == id)
        .map_or("any", |(_, n)| *n),
    }
  }
}

impl Serialize for Category {
  fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(self.name())
  }
}
