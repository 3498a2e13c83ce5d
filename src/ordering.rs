//! Chronological ordering of a selected batch

use crate::transaction::HttpTransaction;

/// Sort a selection by capture time and number it from 1
///
/// Equal capture times keep their selection order, so numbering a selection
/// twice gives the same result. The input is not reordered.
pub fn order<T: HttpTransaction>(selection: &[T]) -> Vec<(usize, &T)> {
    let mut indexed: Vec<(usize, &T)> = selection.iter().enumerate().collect();
    indexed.sort_by_key(|(index, tx)| (tx.capture_time(), *index));

    indexed
        .into_iter()
        .enumerate()
        .map(|(position, (_, tx))| (position + 1, tx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{HttpService, Transaction};
    use proptest::prelude::*;

    fn tx(capture_time: u64, path: &str) -> Transaction {
        Transaction::new(
            "GET",
            format!("http://example.com{path}"),
            HttpService::new("http", "example.com", 80),
            capture_time,
            format!("GET {path} HTTP/1.1\r\n\r\n").into_bytes(),
        )
    }

    #[test]
    fn test_empty_selection() {
        let selection: Vec<Transaction> = vec![];
        assert!(order(&selection).is_empty());
    }

    #[test]
    fn test_newest_first_selection() {
        // Hosts commonly hand over history newest first
        let selection = vec![tx(30, "/c"), tx(20, "/b"), tx(10, "/a")];
        let ordered = order(&selection);

        let urls: Vec<_> = ordered.iter().map(|(n, t)| (*n, t.url.as_str())).collect();
        assert_eq!(
            urls,
            vec![
                (1, "http://example.com/a"),
                (2, "http://example.com/b"),
                (3, "http://example.com/c"),
            ]
        );
        assert_eq!(selection[0].capture_time, 30, "Input must not be reordered");
    }

    #[test]
    fn test_ties_keep_selection_order() {
        let selection = vec![tx(5, "/first"), tx(1, "/early"), tx(5, "/second")];
        let ordered = order(&selection);

        assert_eq!(ordered[0].1.url, "http://example.com/early");
        assert_eq!(ordered[1].1.url, "http://example.com/first");
        assert_eq!(ordered[2].1.url, "http://example.com/second");
    }

    proptest! {
        #[test]
        fn prop_order_numbers_dense(times in proptest::collection::vec(any::<u64>(), 0..64)) {
            let selection: Vec<_> = times.iter().map(|t| tx(*t, "/")).collect();
            let ordered = order(&selection);

            let numbers: Vec<usize> = ordered.iter().map(|(n, _)| *n).collect();
            let expected: Vec<usize> = (1..=selection.len()).collect();
            prop_assert_eq!(numbers, expected);
        }

        #[test]
        fn prop_order_follows_capture_time(times in proptest::collection::vec(any::<u64>(), 0..64)) {
            let selection: Vec<_> = times.iter().map(|t| tx(*t, "/")).collect();
            let ordered = order(&selection);

            for pair in ordered.windows(2) {
                prop_assert!(pair[0].1.capture_time <= pair[1].1.capture_time);
            }
        }

        #[test]
        fn prop_order_is_repeatable(times in proptest::collection::vec(0u64..8, 0..32)) {
            let selection: Vec<_> = times
                .iter()
                .enumerate()
                .map(|(i, t)| tx(*t, &format!("/{i}")))
                .collect();

            let first: Vec<_> = order(&selection).iter().map(|(n, t)| (*n, t.url.clone())).collect();
            let second: Vec<_> = order(&selection).iter().map(|(n, t)| (*n, t.url.clone())).collect();
            prop_assert_eq!(first, second);
        }
    }
}
