//! Canonical component names
//!
//! Exported models repeat the same physical part many times with numeric
//! suffixes (`Mesh001`, `Mesh002`, `Coil_12_`). Stripping the digits and
//! tidying the separators groups those copies under one component name.

/// Separator collapsed and trimmed during normalization
pub const NAME_SEPARATOR: char = '_';

/// Map a raw scene-node name to its canonical component name.
///
/// Removes every ASCII digit, collapses runs of `_` into one and strips a
/// single trailing `_`. The function is total and idempotent.
pub fn normalize_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());

    for c in raw.chars() {
        if c.is_ascii_digit() {
            continue;
        }
        if c == NAME_SEPARATOR && name.ends_with(NAME_SEPARATOR) {
            continue;
        }
        name.push(c);
    }

    if name.ends_with(NAME_SEPARATOR) {
        name.pop();
    }

    name
}
