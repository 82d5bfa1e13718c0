//! `{{name}}` placeholder substitution

use std::collections::HashMap;

/// Replace every `{{name}}` in `template` with `bindings[name]`.
///
/// Placeholders without a binding are copied through verbatim, as is an
/// unclosed `{{`. Bound values are not rescanned, so a value containing
/// `{{...}}` is inserted literally. Unused bindings are ignored.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use scale_trainer::quiz::format_question;
///
/// let bindings = HashMap::from([("key", "C"), ("majMin", "Major")]);
/// assert_eq!(
///     format_question("Which is perfect fifth of {{key}} ({{majMin}})?", &bindings),
///     "Which is perfect fifth of C (Major)?"
/// );
/// ```
pub fn format_question(template: &str, bindings: &HashMap<&str, &str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after_open[..close];
        if name.contains('{') {
            // `{{{key}}` and friends: emit one brace and rescan from the next
            out.push('{');
            rest = &rest[open + 1..];
            continue;
        }

        match bindings.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}
