use regex::Regex;

mod bills;
mod new_bill;

/// Opening tag of the element carrying `data-testid="{test_id}"`.
pub fn tag(html: &str, test_id: &str) -> Option<String> {
    let pattern = format!(r#"<[^<>]*data-testid="{}"[^<>]*>"#, regex::escape(test_id));
    Regex::new(&pattern)
        .unwrap()
        .find(html)
        .map(|m| m.as_str().to_string())
}

pub fn has_class(html: &str, test_id: &str, class: &str) -> bool {
    let tag = tag(html, test_id).unwrap_or_else(|| panic!("no element {}", test_id));
    Regex::new(r#"class="([^"]*)""#)
        .unwrap()
        .captures(&tag)
        .map_or(false, |c| c[1].split_whitespace().any(|c| c == class))
}
