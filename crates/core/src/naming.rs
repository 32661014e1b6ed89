//! Assignee name resolution helpers.
//!
//! A free-text "Assignee" cell (from CSV import or a form) resolves to a
//! persistent assignee record. These helpers are the pure half of that
//! operation: splitting the name and generating deterministic placeholder
//! emails. The uniqueness probing itself queries the store and lives in
//! `stocktake-db`.

/// A full name split into first name and optional last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub fname: String,
    pub lname: Option<String>,
}

/// Split a free-text name on the first whitespace into (first, rest).
///
/// Returns `None` for empty/whitespace-only input.
pub fn parse_full_name(full_name: &str) -> Option<ParsedName> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => Some(ParsedName {
            fname: first.to_string(),
            lname: Some(rest.trim().to_string()),
        }),
        None => Some(ParsedName {
            fname: trimmed.to_string(),
            lname: None,
        }),
    }
}

/// Lowercase a name segment and strip everything but word characters.
fn sanitize(segment: &str) -> String {
    segment
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Generate the placeholder email for a parsed name.
///
/// `suffix = 0` yields the base form
/// `{fname}.{lname}.placeholder@auto.generated`; a positive suffix is
/// appended to the last name segment (`{fname}.{lname}{n}.placeholder@...`)
/// and is used to probe for an unused address.
pub fn placeholder_email(name: &ParsedName, suffix: u32) -> String {
    let safe_fname = sanitize(&name.fname);
    let safe_lname = name.lname.as_deref().map(sanitize);

    let counter = if suffix == 0 {
        String::new()
    } else {
        suffix.to_string()
    };

    match safe_lname {
        Some(lname) => format!("{safe_fname}.{lname}{counter}.placeholder@auto.generated"),
        None => format!("{safe_fname}{counter}.placeholder@auto.generated"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_whitespace() {
        let name = parse_full_name("Jane Doe").unwrap();
        assert_eq!(name.fname, "Jane");
        assert_eq!(name.lname.as_deref(), Some("Doe"));
    }

    #[test]
    fn keeps_compound_last_names() {
        let name = parse_full_name("Mary Anne van Dyke").unwrap();
        assert_eq!(name.fname, "Mary");
        assert_eq!(name.lname.as_deref(), Some("Anne van Dyke"));
    }

    #[test]
    fn single_word_has_no_last_name() {
        let name = parse_full_name("  Cher  ").unwrap();
        assert_eq!(name.fname, "Cher");
        assert_eq!(name.lname, None);
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(parse_full_name(""), None);
        assert_eq!(parse_full_name("   "), None);
    }

    #[test]
    fn placeholder_email_base_form() {
        let name = parse_full_name("Jane Doe").unwrap();
        assert_eq!(
            placeholder_email(&name, 0),
            "jane.doe.placeholder@auto.generated"
        );
    }

    #[test]
    fn placeholder_email_probes_with_suffix() {
        let name = parse_full_name("Jane Doe").unwrap();
        assert_eq!(
            placeholder_email(&name, 2),
            "jane.doe2.placeholder@auto.generated"
        );
    }

    #[test]
    fn placeholder_email_single_name() {
        let name = parse_full_name("Cher").unwrap();
        assert_eq!(placeholder_email(&name, 0), "cher.placeholder@auto.generated");
        assert_eq!(
            placeholder_email(&name, 1),
            "cher1.placeholder@auto.generated"
        );
    }

    #[test]
    fn placeholder_email_strips_punctuation() {
        let name = parse_full_name("Jean-Luc O'Brien").unwrap();
        assert_eq!(
            placeholder_email(&name, 0),
            "jeanluc.obrien.placeholder@auto.generated"
        );
    }
}
