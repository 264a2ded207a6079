//! HTML/XML character reference decoding for question bank text.
//!
//! Covers the five XML entities, numeric references (decimal and hex) and the
//! named Latin-1/typographic entities the bank uses in practice. Anything else
//! is copied through verbatim, so plain text decodes to itself.

/// Longest entity name we look for, `&` and `;` excluded.
const MAX_NAME_LEN: usize = 10;

fn named(name: &str) -> Option<char> {
  let ch = match name {
    "quot" => '"',
    "amp" => '&',
    "apos" => '\'',
    "lt" => '<',
    "gt" => '>',
    "nbsp" => '\u{a0}',
    "shy" => '\u{ad}',
    "iexcl" => '¡',
    "iquest" => '¿',
    "cent" => '¢',
    "pound" => '£',
    "euro" => '€',
    "yen" => '¥',
    "copy" => '©',
    "reg" => '®',
    "trade" => '™',
    "deg" => '°',
    "plusmn" => '±',
    "sup2" => '²',
    "sup3" => '³',
    "micro" => 'µ',
    "para" => '¶',
    "middot" => '·',
    "frac14" => '¼',
    "frac12" => '½',
    "frac34" => '¾',
    "times" => '×',
    "divide" => '÷',
    "laquo" => '«',
    "raquo" => '»',
    "lsquo" => '\u{2018}',
    "rsquo" => '\u{2019}',
    "sbquo" => '\u{201a}',
    "ldquo" => '\u{201c}',
    "rdquo" => '\u{201d}',
    "bdquo" => '\u{201e}',
    "ndash" => '\u{2013}',
    "mdash" => '\u{2014}',
    "hellip" => '\u{2026}',
    "prime" => '\u{2032}',
    "Prime" => '\u{2033}',
    "pi" => 'π',
    "Agrave" => 'À',
    "Aacute" => 'Á',
    "Acirc" => 'Â',
    "Atilde" => 'Ã',
    "Auml" => 'Ä',
    "Aring" => 'Å',
    "AElig" => 'Æ',
    "Ccedil" => 'Ç',
    "Egrave" => 'È',
    "Eacute" => 'É',
    "Ecirc" => 'Ê',
    "Euml" => 'Ë',
    "Igrave" => 'Ì',
    "Iacute" => 'Í',
    "Icirc" => 'Î',
    "Iuml" => 'Ï',
    "Ntilde" => 'Ñ',
    "Ograve" => 'Ò',
    "Oacute" => 'Ó',
    "Ocirc" => 'Ô',
    "Otilde" => 'Õ',
    "Ouml" => 'Ö',
    "Oslash" => 'Ø',
    "Ugrave" => 'Ù',
    "Uacute" => 'Ú',
    "Ucirc" => 'Û',
    "Uuml" => 'Ü',
    "Yacute" => 'Ý',
    "szlig" => 'ß',
    "agrave" => 'à',
    "aacute" => 'á',
    "acirc" => 'â',
    "atilde" => 'ã',
    "auml" => 'ä',
    "aring" => 'å',
    "aelig" => 'æ',
    "ccedil" => 'ç',
    "egrave" => 'è',
    "eacute" => 'é',
    "ecirc" => 'ê',
    "euml" => 'ë',
    "igrave" => 'ì',
    "iacute" => 'í',
    "icirc" => 'î',
    "iuml" => 'ï',
    "ntilde" => 'ñ',
    "ograve" => 'ò',
    "oacute" => 'ó',
    "ocirc" => 'ô',
    "otilde" => 'õ',
    "ouml" => 'ö',
    "oslash" => 'ø',
    "ugrave" => 'ù',
    "uacute" => 'ú',
    "ucirc" => 'û',
    "uuml" => 'ü',
    "yacute" => 'ý',
    "yuml" => 'ÿ',
    "Scaron" => 'Š',
    "scaron" => 'š',
    "OElig" => 'Œ',
    "oelig" => 'œ',
    _ => return None,
  };
  Some(ch)
}

fn numeric(body: &str) -> Option<char> {
  let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
    u32::from_str_radix(hex, 16).ok()?
  } else {
    body.parse::<u32>().ok()?
  };
  char::from_u32(code).filter(|c| *c != '\0')
}

/// Resolve the body of a reference (between `&` and `;`).
fn resolve(body: &str) -> Option<char> {
  match body.strip_prefix('#') {
    Some(num) if !num.is_empty() => numeric(num),
    Some(_) => None,
    None => named(body),
  }
}

/// Decode character references in `s` into literal text.
pub fn decode_entities(s: &str) -> String {
  if !s.contains('&') {
    return s.to_string();
  }

  let mut out = String::with_capacity(s.len());
  let mut rest = s;
  while let Some(amp) = rest.find('&') {
    out.push_str(&rest[..amp]);
    let tail = &rest[amp + 1..];
    let decoded = tail
      .find(';')
      .filter(|&semi| semi > 0 && semi <= MAX_NAME_LEN)
      .and_then(|semi| resolve(&tail[..semi]).map(|ch| (ch, semi)));
    match decoded {
      Some((ch, semi)) => {
        out.push(ch);
        rest = &tail[semi + 1..];
      }
      None => {
        out.push('&');
        rest = tail;
      }
    }
  }
  out.push_str(rest);
  out
}
