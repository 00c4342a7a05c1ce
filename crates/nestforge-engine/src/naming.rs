//! Naming conventions for generated artifacts.
//!
//! Entity and field names arrive in whatever casing the user typed
//! (camelCase, PascalCase, snake_case, kebab-case). Every name that ends up
//! in a class, property, file, or route goes through these helpers so the
//! generated tree stays internally consistent.

/// Splits a name into lowercase words on `_`, `-`, and uppercase boundaries.
fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(current.clone());
                current.clear();
            }
        } else if c.is_uppercase() {
            if !current.is_empty() {
                words.push(current.clone());
                current.clear();
            }
            current.push(c.to_lowercase().next().unwrap());
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts a name to PascalCase (class and type names).
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Converts a name to camelCase (property and variable names).
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Converts a name to kebab-case (file and directory names).
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Converts a name to snake_case (database table names).
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Converts a name to CONSTANT_CASE (injection token names).
pub fn to_constant_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| word.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Naive English pluralization for route paths and collection properties.
pub fn pluralize(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    match chars.last() {
        Some('y') if chars.len() > 1 && !is_vowel(chars[chars.len() - 2]) => {
            format!("{}ies", &s[..s.len() - 1])
        }
        Some('s') | Some('x') | Some('z') => format!("{s}es"),
        _ if s.ends_with("ch") || s.ends_with("sh") => format!("{s}es"),
        _ => format!("{s}s"),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("user"), "User");
        assert_eq!(to_pascal_case("blog_post"), "BlogPost");
        assert_eq!(to_pascal_case("blog-post"), "BlogPost");
        assert_eq!(to_pascal_case("blogPost"), "BlogPost");
        assert_eq!(to_pascal_case("OrderItem"), "OrderItem");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("user"), "user");
        assert_eq!(to_camel_case("blog_post"), "blogPost");
        assert_eq!(to_camel_case("OrderItem"), "orderItem");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(to_kebab_case("user"), "user");
        assert_eq!(to_kebab_case("BlogPost"), "blog-post");
        assert_eq!(to_kebab_case("order_item"), "order-item");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("BlogPost"), "blog_post");
        assert_eq!(to_snake_case("order-item"), "order_item");
    }

    #[test]
    fn test_constant_case() {
        assert_eq!(to_constant_case("user"), "USER");
        assert_eq!(to_constant_case("BlogPost"), "BLOG_POST");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("branch"), "branches");
    }
}
