//! Placeholder substitution for item templates.
//!
//! Tokens are replaced literally in a single left-to-right pass. Text coming
//! from a replacement is never scanned again, so a label containing `{url}`
//! stays as written.

/// Replace each token in `template` with its value.
///
/// When several tokens match at the same position the longest wins.
pub fn substitute(template: &str, tokens: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while !rest.is_empty() {
        let matched = tokens
            .iter()
            .filter(|(token, _)| !token.is_empty() && rest.starts_with(token))
            .max_by_key(|(token, _)| token.len());

        match matched {
            Some((token, value)) => {
                out.push_str(value);
                rest = &rest[token.len()..];
            }
            None => {
                let Some(ch) = rest.chars().next() else {
                    break;
                };
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out
}
