//! Logical-direction (LTR→RTL) stylesheet transform.
//!
//! # Responsibilities
//! - Swap `left`/`right` in direction-sensitive property names
//!   (`margin-left`, `border-right-width`, `border-top-left-radius`, ...)
//! - Swap `left`/`right` in the values of `float`, `clear` and `text-align`
//! - Mirror 4-value shorthands for `margin`, `padding`, `border-width`,
//!   `border-style` and `border-color`
//! - Mirror the corner order of 4-value `border-radius`
//!
//! # Design Decisions
//! - Text-level rewrite, no CSS parsing; declarations are located by
//!   scanning for `{`, `}` and `;` boundaries
//! - Selectors, at-rule preludes and comments are never touched
//! - Direction-neutral declarations pass through byte-identical, which
//!   makes the transform idempotent on neutral input

/// Properties whose value is a side keyword to flip.
const FLIP_VALUE_PROPS: [&str; 3] = ["float", "clear", "text-align"];

/// Properties whose 4-value shorthand runs top/right/bottom/left.
const MIRROR_BOX_PROPS: [&str; 5] = [
    "margin",
    "padding",
    "border-width",
    "border-style",
    "border-color",
];

/// Apply the left/right mirror to a whole stylesheet.
pub fn transform(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;

    while let Some(i) = rest.find(['{', '}', ';']) {
        let (chunk, tail) = rest.split_at(i);
        let delimiter = tail.as_bytes()[0] as char;

        if delimiter == '{' {
            // Selector or at-rule prelude.
            out.push_str(chunk);
        } else {
            out.push_str(&flip_declaration(chunk));
        }

        out.push(delimiter);
        rest = &tail[1..];
    }

    out.push_str(&flip_declaration(rest));
    out
}

/// Mirror a single `property: value` declaration.
///
/// Leading comments are split off first so neither the property lookup nor
/// `flip_side` ever touches comment text.
fn flip_declaration(decl: &str) -> String {
    let (prefix, body) = decl.split_at(comment_prefix_len(decl));
    let Some(colon) = body.find(':') else {
        return decl.to_owned();
    };
    let (prop_raw, rest) = body.split_at(colon);
    let value = &rest[1..];
    let prop = prop_raw.trim();

    let flipped_value = if FLIP_VALUE_PROPS.contains(&prop) {
        let (value_prefix, keyword) = value.split_at(comment_prefix_len(value));
        format!("{}{}", value_prefix, flip_side(keyword))
    } else if MIRROR_BOX_PROPS.contains(&prop) {
        mirror_box_shorthand(value)
    } else if prop == "border-radius" {
        mirror_radius_shorthand(value)
    } else {
        value.to_owned()
    };

    format!("{}{}:{}", prefix, flip_side(prop_raw), flipped_value)
}

/// Length of the leading run of whitespace and `/* ... */` comments.
fn comment_prefix_len(text: &str) -> usize {
    let mut len = 0;
    loop {
        let rest = &text[len..];
        let trimmed = rest.trim_start();
        len += rest.len() - trimmed.len();
        match trimmed.strip_prefix("/*") {
            Some(after) => match after.find("*/") {
                Some(end) => len += "/*".len() + end + "*/".len(),
                // Unterminated comment swallows the rest of the chunk.
                None => return len + trimmed.len(),
            },
            None => return len,
        }
    }
}

/// Swap the first occurrence of `left` or `right` in the text.
fn flip_side(text: &str) -> String {
    if let Some(i) = text.find("left") {
        let mut out = String::with_capacity(text.len() + 1);
        out.push_str(&text[..i]);
        out.push_str("right");
        out.push_str(&text[i + "left".len()..]);
        out
    } else if let Some(i) = text.find("right") {
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..i]);
        out.push_str("left");
        out.push_str(&text[i + "right".len()..]);
        out
    } else {
        text.to_owned()
    }
}

/// Mirror `top right bottom left` to `top left bottom right`.
///
/// Only exact 4-value shorthands are direction-sensitive; anything else
/// (1-3 values, `!important`, slashes, functions) passes through untouched.
fn mirror_box_shorthand(value: &str) -> String {
    mirror_tokens(value, [0, 3, 2, 1]).unwrap_or_else(|| value.to_owned())
}

/// Mirror `tl tr br bl` corner order to `tr tl bl br`.
fn mirror_radius_shorthand(value: &str) -> String {
    mirror_tokens(value, [1, 0, 3, 2]).unwrap_or_else(|| value.to_owned())
}

/// Permute a 4-token value, keeping every original separator in place so
/// mirror-symmetric values come back byte-identical.
fn mirror_tokens(value: &str, order: [usize; 4]) -> Option<String> {
    if value.contains(['!', '/', '(']) {
        return None;
    }
    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.len() != 4 {
        return None;
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    for index in order {
        let trimmed = rest.trim_start();
        out.push_str(&rest[..rest.len() - trimmed.len()]);
        out.push_str(tokens[index]);
        let original_len = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        rest = &trimmed[original_len..];
    }
    out.push_str(rest);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_directional_property_names() {
        assert_eq!(
            transform(".a { margin-left: 4px; }"),
            ".a { margin-right: 4px; }"
        );
        assert_eq!(
            transform(".a { border-right-width: 1px; }"),
            ".a { border-left-width: 1px; }"
        );
        assert_eq!(
            transform(".a { padding-right: 0; }"),
            ".a { padding-left: 0; }"
        );
    }

    #[test]
    fn flips_radius_corners() {
        assert_eq!(
            transform(".a { border-top-left-radius: 3px; }"),
            ".a { border-top-right-radius: 3px; }"
        );
        assert_eq!(
            transform(".a { border-bottom-right-radius: 3px; }"),
            ".a { border-bottom-left-radius: 3px; }"
        );
    }

    #[test]
    fn flips_side_keyword_values() {
        assert_eq!(transform(".a { float: left; }"), ".a { float: right; }");
        assert_eq!(transform(".a { clear: right; }"), ".a { clear: left; }");
        assert_eq!(
            transform(".a { text-align: left; }"),
            ".a { text-align: right; }"
        );
        // center is direction-neutral
        assert_eq!(
            transform(".a { text-align: center; }"),
            ".a { text-align: center; }"
        );
    }

    #[test]
    fn mirrors_four_value_shorthands() {
        assert_eq!(
            transform(".a { margin: 1px 2px 3px 4px; }"),
            ".a { margin: 1px 4px 3px 2px; }"
        );
        assert_eq!(
            transform(".a { border-radius: 1px 2px 3px 4px; }"),
            ".a { border-radius: 2px 1px 4px 3px; }"
        );
        // fewer than four values is symmetric already
        assert_eq!(
            transform(".a { margin: 1px 2px; }"),
            ".a { margin: 1px 2px; }"
        );
    }

    #[test]
    fn comments_before_declarations_are_untouched() {
        assert_eq!(
            transform(".a { /* left gutter */ margin-left: 4px; }"),
            ".a { /* left gutter */ margin-right: 4px; }"
        );
        // A colon inside the comment does not confuse the property lookup.
        assert_eq!(
            transform(".a { /* left: legacy */ float: left; }"),
            ".a { /* left: legacy */ float: right; }"
        );
    }

    #[test]
    fn comments_before_side_keyword_values_are_untouched() {
        assert_eq!(
            transform(".a { float: /* keep left */ left; }"),
            ".a { float: /* keep left */ right; }"
        );
    }

    #[test]
    fn mirroring_preserves_original_separators() {
        // Symmetric values come back byte-identical.
        assert_eq!(
            transform(".a { margin:1px 1px 1px 1px; }"),
            ".a { margin:1px 1px 1px 1px; }"
        );
        // Uneven spacing is kept, only the tokens move.
        assert_eq!(
            transform(".a { margin:1px  2px\t3px 4px; }"),
            ".a { margin:1px  4px\t3px 2px; }"
        );
    }

    #[test]
    fn last_declaration_without_semicolon_is_flipped() {
        assert_eq!(
            transform(".a { color: red; margin-left: 1px }"),
            ".a { color: red; margin-right: 1px }"
        );
    }

    #[test]
    fn selectors_and_at_rules_are_untouched()  {
        let css = "@media (min-width: 600px) { .left-rail { color: red; } }";
        assert_eq!(transform(css), css);
    }

    #[test]
    fn neutral_stylesheet_is_unchanged() {
        let css = "body { color: black; font-size: 14px }\n.b { display: flex }\n";
        assert_eq!(transform(css), css);
    }

    #[test]
    fn transform_is_an_involution_on_simple_rules() {
        let css = ".a { float: left; margin-left: 2px; }";
        assert_eq!(transform(&transform(css)), css);
    }
}
