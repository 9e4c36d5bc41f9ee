//! Shared page-building pieces: breadcrumbs, tables, display formatting.

pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
}

impl Crumb {
    pub fn link(label: &str, href: &str) -> Self {
        Crumb {
            label: label.to_string(),
            href: Some(href.to_string()),
        }
    }

    pub fn current(label: &str) -> Self {
        Crumb {
            label: label.to_string(),
            href: None,
        }
    }
}

/// `Home / Personas / Avery Quinn` with all but the last entry linked.
pub fn render_breadcrumb(crumbs: &[Crumb]) -> String {
    let parts: Vec<String> = crumbs
        .iter()
        .map(|c| match c.href.as_ref() {
            Some(href) => format!("[{}]({})", c.label, href),
            None => format!("**{}**", c.label),
        })
        .collect();
    parts.join(" / ")
}

/// A pipe table. Cell text is sanitized so embedded pipes and newlines
/// cannot break the row structure.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&headers.join(" | "));
    out.push_str(" |\n|");
    for _ in headers {
        out.push_str(" --- |");
    }
    out.push('\n');
    for row in rows {
        out.push_str("| ");
        let cells: Vec<String> = row.iter().map(|c| table_cell(c)).collect();
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
    }
    out
}

fn table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Whole-dollar currency, US grouping: `$1,235`. Summary figures round to
/// whole dollars; order lines use [`fmt_price`].
pub fn fmt_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = amount.abs().round() as u64;
    let grouped = group_thousands(rounded);
    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Exact currency for order lines: `$9.99`.
pub fn fmt_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn fmt_number(value: u64) -> String {
    group_thousands(value)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (idx + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breadcrumb_links_all_but_current() {
        let crumbs = [
            Crumb::link("Home", "/"),
            Crumb::link("Personas", "/personas"),
            Crumb::current("Avery Quinn"),
        ];
        assert_eq!(
            render_breadcrumb(&crumbs),
            "[Home](/) / [Personas](/personas) / **Avery Quinn**"
        );
    }

    #[test]
    fn numbers_group_thousands() {
        assert_eq!(fmt_number(0), "0");
        assert_eq!(fmt_number(999), "999");
        assert_eq!(fmt_number(1000), "1,000");
        assert_eq!(fmt_number(1234567), "1,234,567");
    }

    #[test]
    fn currency_rounds_to_whole_dollars() {
        assert_eq!(fmt_currency(1234.56), "$1,235");
        assert_eq!(fmt_currency(0.4), "$0");
        assert_eq!(fmt_price(9.991), "$9.99");
    }

    #[test]
    fn table_cells_escape_pipes() {
        let table = render_table(&["a"], &[vec!["x|y".to_string()]]);
        assert!(table.contains("x\\|y"));
    }
}
