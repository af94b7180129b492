//! Consumed-food summary
//!
//! Collapses the names consumed in a session into "2x Apples" style lines.

use std::collections::HashMap;

use crate::models::normalize_name;

/// One display line per distinct food, in first-occurrence order.
///
/// Names are grouped by their normalized form. A count above one gets a
/// trailing "s"; a count of one still carries its "1x" prefix.
pub fn summarize_consumed<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for raw in names {
        let name = normalize_name(raw.as_ref());
        if name.is_empty() {
            continue;
        }
        let count = counts.entry(name.clone()).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }

    order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            if count > 1 {
                format!("{}x {}s", count, name)
            } else {
                format!("{}x {}", count, name)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_pluralizes() {
        assert_eq!(
            summarize_consumed(&["apple", "apple", "banana"]),
            vec!["2x Apples", "1x Banana"]
        );
    }

    #[test]
    fn test_first_occurrence_order_not_sorted() {
        assert_eq!(
            summarize_consumed(&["pear", "apple", "pear", "kiwi", "apple", "pear"]),
            vec!["3x Pears", "2x Apples", "1x Kiwi"]
        );
    }

    #[test]
    fn test_groups_case_insensitively() {
        assert_eq!(summarize_consumed(&["Egg", "EGG ", "egg"]), vec!["3x Eggs"]);
    }

    #[test]
    fn test_empty_input() {
        let none: [&str; 0] = [];
        assert!(summarize_consumed(&none).is_empty());
    }
}
