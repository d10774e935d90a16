// src/utils.rs

/// Normalize a role name for file system usage
pub fn normalize_role_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Capitalize the first letter of every word, lowercase the rest.
/// A word starts after any non-alphabetic character ("full-time" -> "Full-Time").
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_alpha = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}

/// Round to a whole number and group thousands with commas (80000.4 -> "80,000").
/// Ties round to even, so 42.5 -> "42".
pub fn format_thousands(amount: f64) -> String {
    let digits = format!("{:.0}", amount.abs());
    let negative = amount < 0.0;

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Keep the first `max_chars` characters, appending "..." when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Lower-cased host of an http(s) URL, without userinfo or port.
pub fn url_host(url: &str) -> Option<String> {
    let rest = url.trim().split_once("://").map(|(_, rest)| rest)?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit('@').next()?;
    let host = host.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

/// True when `host` is `domain` or one of its subdomains.
pub fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_role_name() {
        assert_eq!(normalize_role_name("Nurse"), "nurse");
        assert_eq!(normalize_role_name("Registered Nurse"), "registered_nurse");
        assert_eq!(normalize_role_name(" pharmacist "), "pharmacist");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("fulltime"), "Fulltime");
        assert_eq!(title_case("full-time"), "Full-Time");
        assert_eq!(title_case("PART TIME"), "Part Time");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(80000.0), "80,000");
        assert_eq!(format_thousands(95000.0), "95,000");
        assert_eq!(format_thousands(1234567.6), "1,234,568");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(45.5), "46");
    }

    #[test]
    fn test_format_thousands_ties_round_to_even() {
        assert_eq!(format_thousands(42.5), "42");
        assert_eq!(format_thousands(41.5), "42");
        assert_eq!(format_thousands(80000.5), "80,000");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 500), "short");
        let long = "é".repeat(501);
        let truncated = truncate_with_ellipsis(&long, 500);
        assert_eq!(truncated.chars().count(), 503);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_with_ellipsis(&"a".repeat(500), 500).len(), 500);
    }

    #[test]
    fn test_url_host() {
        assert_eq!(
            url_host("https://www.Indeed.com/viewjob?jk=1").as_deref(),
            Some("www.indeed.com")
        );
        assert_eq!(
            url_host("http://user@acme.com:8080/jobs").as_deref(),
            Some("acme.com")
        );
        assert_eq!(url_host("not a url"), None);
    }

    #[test]
    fn test_host_matches() {
        assert!(host_matches("www.indeed.com", "indeed.com"));
        assert!(host_matches("indeed.com", "indeed.com"));
        assert!(!host_matches("notindeed.com", "indeed.com"));
    }
}
