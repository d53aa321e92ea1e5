/// Format type characters understood by d3-format.
const D3_TYPE_CHARS: &str = "bcdoxXneEfFgGn%";

/// Converts a Python format string such as `{:,.2f}` into a d3 tick format.
///
/// The format spec of the first replacement field is reused as-is. When it
/// is empty or has no type character, `r` is appended so d3 keeps the
/// significant digits instead of switching to exponent notation.
#[must_use]
pub fn python_format_to_d3_tick_format(python_format: &str) -> String {
    let mut specifier = first_format_spec(python_format).to_owned();
    let has_type = specifier
        .chars()
        .last()
        .is_some_and(|c| D3_TYPE_CHARS.contains(c));
    if !has_type {
        specifier.push('r');
    }
    specifier
}

fn first_format_spec(python_format: &str) -> &str {
    let mut rest = python_format;
    loop {
        let Some(open) = rest.find('{') else {
            return "";
        };
        // `{{` is a literal brace.
        if rest[open + 1..].starts_with('{') {
            rest = &rest[open + 2..];
            continue;
        }
        let field = &rest[open + 1..];
        let Some(close) = field.find('}') else {
            return "";
        };
        let field = &field[..close];
        return field.split_once(':').map_or("", |(_, spec)| spec);
    }
}

#[cfg(test)]
mod tests {
    use super::python_format_to_d3_tick_format;

    #[test]
    fn keeps_explicit_type() {
        assert_eq!(python_format_to_d3_tick_format("{:,.2f}"), ",.2f");
        assert_eq!(python_format_to_d3_tick_format("{:d}"), "d");
        assert_eq!(python_format_to_d3_tick_format("{:.1%}"), ".1%");
    }

    #[test]
    fn appends_r_without_type() {
        assert_eq!(python_format_to_d3_tick_format("{:,}"), ",r");
        assert_eq!(python_format_to_d3_tick_format("{}"), "r");
        assert_eq!(python_format_to_d3_tick_format("no fields"), "r");
    }

    #[test]
    fn skips_escaped_braces() {
        assert_eq!(python_format_to_d3_tick_format("{{x}} {:,.1f}"), ",.1f");
    }
}
