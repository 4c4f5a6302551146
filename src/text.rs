//! Label formatting helpers.

/// Uppercases the first character and lowercases the rest.
///
/// `"hILLclimber"` becomes `"Hillclimber"`, `"ta01"` becomes `"Ta01"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hillclimber"), "Hillclimber");
        assert_eq!(capitalize("hILLclimber"), "Hillclimber");
        assert_eq!(capitalize("ta01"), "Ta01");
        assert_eq!(capitalize("1swap_Restarts"), "1swap_restarts");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
    }
}
