//! Small utility helpers used across modules.

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_strings_pass_through() {
    assert_eq!(trunc_for_log("ok", 10), "ok");
  }

  #[test]
  fn cuts_on_char_boundaries() {
    assert_eq!(trunc_for_log("héllo wörld", 4), "héll… (13 bytes total)");
  }
}
