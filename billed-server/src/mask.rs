/// Mask email address suitable for use in logs.
pub fn email(address: &str) -> String {
    const MASK: &str = "****@******";

    match address.split_once('@') {
        Some((local, host)) if !local.is_empty() && !host.is_empty() => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            let tail: String = {
                let chars: Vec<char> = host.chars().collect();
                if chars.len() > 2 {
                    chars[chars.len() - 2..].iter().collect()
                } else {
                    String::new()
                }
            };
            format!("{}{}{}", first, MASK, tail)
        }
        _ => MASK.to_string(),
    }
}
