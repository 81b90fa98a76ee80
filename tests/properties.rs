//! Property tests for the pipeline laws.

use proptest::prelude::*;
use ww_core::prelude::*;

fn source() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50i32..50, 0..60)
}

proptest! {
    #[test]
    fn test_chunks_flatten_back(items in source(), size in 1usize..12) {
        let chunks: Vec<Vec<i32>> = Pipeline::new(items.clone()).chunks(size).unwrap().collect();

        if let Some((last, full)) = chunks.split_last() {
            prop_assert!(full.iter().all(|chunk| chunk.len() == size));
            prop_assert!(!last.is_empty() && last.len() <= size);
        }
        prop_assert_eq!(chunks.concat(), items);
    }

    #[test]
    fn test_window_count_and_heads(items in source(), size in 1usize..12) {
        prop_assume!(size <= items.len());

        let windows: Vec<Vec<i32>> = Pipeline::new(items.clone()).window(size).unwrap().collect();
        prop_assert_eq!(windows.len(), items.len() - size + 1);
        prop_assert!(windows.iter().all(|window| window.len() == size));

        let heads: Vec<i32> = windows.iter().map(|window| window[0]).collect();
        prop_assert_eq!(&heads[..], &items[..items.len() - size + 1]);
    }

    #[test]
    fn test_firsts_is_padded_prefix(items in source(), n in 0usize..80) {
        let head: Vec<i32> = Pipeline::new(items.clone()).firsts(n, 999).collect();
        prop_assert_eq!(head.len(), n);

        let kept = n.min(items.len());
        prop_assert_eq!(&head[..kept], &items[..kept]);
        prop_assert!(head[kept..].iter().all(|&x| x == 999));
    }

    #[test]
    fn test_lasts_is_padded_suffix(items in source(), n in 0usize..80) {
        let tail: Vec<i32> = Pipeline::new(items.clone()).lasts(n, 999).collect();
        prop_assert_eq!(tail.len(), n);

        let kept = n.min(items.len());
        let padding = n - kept;
        prop_assert!(tail[..padding].iter().all(|&x| x == 999));
        prop_assert_eq!(&tail[padding..], &items[items.len() - kept..]);
    }

    #[test]
    fn test_skip_duplicates_keeps_first_occurrences(items in source()) {
        let unique: Vec<i32> = Pipeline::new(items.clone()).skip_duplicates().collect();

        let mut expected = Vec::new();
        for item in items {
            if !expected.contains(&item) {
                expected.push(item);
            }
        }
        prop_assert_eq!(unique, expected);
    }

    #[test]
    fn test_predicate_start_drops_until_match(items in source(), threshold in -50i32..50) {
        let sliced: Vec<i32> = Pipeline::new(items.clone())
            .slice(SliceSpec::new().start_when(move |x: &i32| *x > threshold))
            .unwrap()
            .collect();
        let expected: Vec<i32> = items.into_iter().skip_while(|x| *x <= threshold).collect();
        prop_assert_eq!(sliced, expected);
    }

    #[test]
    fn test_integer_slices_match_vec_slices(items in source(), start in 0usize..70, len in 0usize..70, step in 1usize..5) {
        let stop = start + len;
        let step = isize::try_from(step).unwrap();
        let sliced: Vec<i32> = Pipeline::new(items.clone())
            .slice(SliceSpec::between(start, stop).step(step))
            .unwrap()
            .collect();

        let expected: Vec<i32> = items
            .iter()
            .copied()
            .take(stop)
            .skip(start)
            .step_by(step.unsigned_abs())
            .collect();
        prop_assert_eq!(sliced, expected);
    }

    #[test]
    fn test_negative_index_matches_vec(items in source(), back in 1usize..70) {
        let index = -isize::try_from(back).unwrap();
        let found = at_index(items.clone(), index);
        if back <= items.len() {
            prop_assert_eq!(found, Ok(items[items.len() - back]));
        } else {
            prop_assert_eq!(found, Err(Error::IndexOutOfRange { index }));
        }
    }
}
