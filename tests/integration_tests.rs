//! Integration tests for ww-core.

use std::cell::Cell;
use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use ww_core::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn squares() -> Pipeline<'static, i32> {
    Pipeline::new((0..10).map(|x| x * x))
}

fn ends_with_5(x: &i32) -> bool {
    x % 10 == 5
}

#[test]
fn test_squares_scenario() -> Result<()> {
    init_logging();

    let middle: Vec<_> = squares().slice(3..8)?.collect();
    assert_eq!(middle, vec![9, 16, 25, 36, 49]);

    assert_eq!(squares().at(-1)?, 81);

    let from_25: Vec<_> = squares()
        .slice(SliceSpec::new().start_when(ends_with_5))?
        .collect();
    assert_eq!(from_25, vec![25, 36, 49, 64, 81]);

    assert_eq!(squares().first_match(ends_with_5)?, 25);
    Ok(())
}

#[test]
fn test_select_dispatch() -> Result<()> {
    assert_eq!(squares().select(-1)?.into_item(), Some(81));
    assert_eq!(squares().select(Selector::first(ends_with_5))?.into_item(), Some(25));

    let sliced = squares().select(3..5)?.into_items().map(Iterator::collect::<Vec<_>>);
    assert_eq!(sliced, Some(vec![9, 16]));

    let error = squares().select(20).unwrap_err();
    assert_eq!(error, Error::IndexOutOfRange { index: 20 });
    assert_eq!(error.to_string(), "index \"20\" out of range");
    Ok(())
}

#[test]
fn test_slice_predicate_start_with_integer_stop() -> Result<()> {
    // The stop offset counts from the first matching element.
    let sliced: Vec<_> = squares()
        .slice(SliceSpec::new().start_when(ends_with_5).stop(3))?
        .collect();
    assert_eq!(sliced, vec![25, 36, 49]);

    let sliced: Vec<_> = squares()
        .slice(SliceSpec::new().start(1).stop_when(|x: &i32| *x > 20).step(2))?
        .collect();
    assert_eq!(sliced, vec![1, 9]);
    Ok(())
}

#[test]
fn test_slice_step_applies_before_lone_predicates() -> Result<()> {
    // Odd items are skipped before the stop predicate ever sees 3.
    let sliced: Vec<_> = Pipeline::new(0..10)
        .slice(SliceSpec::new().start(0).stop_when(|x: &i32| *x == 3).step(2))?
        .collect();
    assert_eq!(sliced, vec![0, 2, 4, 6, 8]);

    let sliced: Vec<_> = Pipeline::new(0..10)
        .slice(SliceSpec::new().start_when(|x: &i32| *x >= 3).stop(2).step(2))?
        .collect();
    assert_eq!(sliced, vec![4, 6]);

    let error = Pipeline::new(0..10).slice(SliceSpec::new().step(0)).err();
    assert!(matches!(error, Some(Error::InvalidBoundary { .. })));
    Ok(())
}

#[test]
fn test_negative_step_is_rejected_before_reading() {
    init_logging();

    let reads = Cell::new(0);
    let specs = vec![
        SliceSpec::new().step(-1),
        SliceSpec::between(1, 3).step(-1),
        SliceSpec::new().start_when(|_: &i32| true).step(-2),
        SliceSpec::new().start(-4),
    ];

    for spec in specs {
        let source = Pipeline::new((0..5).inspect(|_| reads.set(reads.get() + 1)));
        let error = source.slice(spec).err();
        assert!(matches!(error, Some(Error::InvalidBoundary { .. })));
    }
    assert_eq!(reads.get(), 0);
}

#[test]
fn test_zero_step_is_rejected_before_reading() {
    let reads = Cell::new(0);
    let source = Pipeline::new((0..5).inspect(|_| reads.set(reads.get() + 1)));
    let error = source.slice(SliceSpec::between(1, 4).step(0)).err();
    assert_eq!(
        error,
        Some(Error::InvalidBoundary {
            value: "0".to_string(),
            reason: "step must be a positive integer"
        })
    );
    assert_eq!(reads.get(), 0);
}

#[test]
fn test_tee_branches_and_frozen_original() {
    init_logging();

    let mut original = squares().slice(..3).unwrap();
    let branches = original.tee(2).unwrap();
    assert_eq!(branches.len(), 2);
    for branch in branches {
        assert_eq!(branch.collect::<Vec<_>>(), vec![0, 1, 4]);
    }

    assert!(original.is_forked());
    assert_eq!(original.try_next(), Err(Error::Forked));
    assert_eq!(original.iter().err(), Some(Error::Forked));
    assert_eq!(original.next_or(7), Err(Error::Forked));
    assert_eq!(
        Error::Forked.to_string(),
        "can't iterate on a pipeline after tee() has been called on it"
    );

    assert_eq!(original.size_hint(), (0, None));

    // Derived pipelines stay frozen.
    let derived = original.map(|x| x + 1);
    assert_eq!(derived.to_vec(), Err(Error::Forked));
}

#[test]
#[should_panic(expected = "after tee()")]
fn test_iterating_forked_pipeline_panics() {
    let mut original = squares();
    let _branches = original.tee(2).unwrap();
    let _ = original.next();
}

#[test]
fn test_copy_keeps_original_readable() -> Result<()> {
    let mut original = Pipeline::new("abcd".chars());
    assert_eq!(original.try_next()?, Some('a'));

    let copy = original.copy()?;
    assert_eq!(original.next_or('-')?, 'b');
    assert_eq!(copy.collect::<String>(), "bcd");
    assert_eq!(original.collect::<String>(), "cd");
    Ok(())
}

#[test]
fn test_skip_duplicates_scenarios() {
    let unique: Vec<_> = Pipeline::new(vec![1, 2, 3, 4, 4, 2, 1, 3, 4])
        .skip_duplicates()
        .collect();
    assert_eq!(unique, vec![1, 2, 3, 4]);

    let mut seen: HashSet<usize> = HashSet::new();
    let first: Vec<_> = Pipeline::new(vec!["a", "bb"])
        .skip_duplicates_by(|s: &&str| s.len(), &mut seen)
        .collect();
    let second: Vec<_> = Pipeline::new(vec!["c", "ddd"])
        .skip_duplicates_by(|s: &&str| s.len(), &mut seen)
        .collect();
    assert_eq!(first, vec!["a", "bb"]);
    assert_eq!(second, vec!["ddd"]);
}

#[test]
fn test_count_after_seeded_skip_duplicates() -> Result<()> {
    let mut seen: HashSet<i32> = [1].into_iter().collect();
    let remaining = Pipeline::new(vec![1]).skip_duplicates_by(|x| *x, &mut seen);
    assert_eq!(remaining.count()?, 0);

    let mut seen: HashSet<i32> = [2].into_iter().collect();
    let remaining = Pipeline::new(vec![1, 2, 3]).skip_duplicates_by(|x| *x, &mut seen);
    assert_eq!(remaining.count()?, 2);
    Ok(())
}

#[test]
fn test_unhashable_fingerprint() {
    let rows = vec![vec![1, 2], vec![1, 2], vec![3]];
    let mut results = Pipeline::new(rows).skip_duplicates_checked(|row| Fingerprint::from(row.clone()));

    let error = results.next().unwrap().unwrap_err();
    let message = error.to_string();
    assert!(message.contains("'list'"));
    assert!(message.contains("[1, 2]"));
    assert!(results.next().is_none());

    let tuples = vec![(1, "a"), (1, "a"), (2, "b")];
    let unique = Pipeline::new(tuples)
        .skip_duplicates_checked(|&pair| Fingerprint::from(pair))
        .collect::<Result<Vec<_>>>()
        .unwrap();
    assert_eq!(unique, vec![(1, "a"), (2, "b")]);
}

#[test]
fn test_groupby_regroups_by_sorted_key() -> Result<()> {
    init_logging();

    let data = vec![(1, true), (2, true), (3, true), (4, false), (5, false), (6, true)];
    let groups: Vec<_> = Pipeline::new(data)
        .group_by(|x| x.1, GroupOptions::default())?
        .collect();
    assert_eq!(
        groups,
        vec![
            (false, vec![(4, false), (5, false)]),
            (true, vec![(1, true), (2, true), (3, true), (6, true)]),
        ]
    );

    let config = ConfigBuilder::map().with("reverse", true).build();
    let counts: Vec<_> = Pipeline::new(vec![1, 2, 3, 4, 5])
        .group_by_with(|x| x % 2, GroupOptions::from_config(&config)?, |group| group.len())?
        .collect();
    assert_eq!(counts, vec![(1, 3), (0, 2)]);
    Ok(())
}

#[test]
fn test_renamed_key_is_refused() {
    let config = ConfigBuilder::map().with("keyfunc", "len").build();
    let error = SortOptions::from_config(&config).unwrap_err();
    assert_eq!(
        error,
        Error::Config(ConfigError::RenamedArgument {
            old: "keyfunc",
            new: "key"
        })
    );
}

#[test]
fn test_chunks_windows_and_padding() -> Result<()> {
    let chunks: Vec<_> = Pipeline::new(0..7).chunks(3)?.collect();
    assert_eq!(chunks, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);

    let words: Vec<String> = Pipeline::new("abcde".chars())
        .chunks_with(2, |chunk| chunk.into_iter().collect::<String>())?
        .collect();
    assert_eq!(words, vec!["ab", "cd", "e"]);

    let windows: Vec<_> = Pipeline::new(0..4).window(3)?.collect();
    assert_eq!(windows, vec![vec![0, 1, 2], vec![1, 2, 3]]);
    let short: Vec<_> = Pipeline::new(0..2).window(3)?.collect();
    assert_eq!(short, vec![vec![0, 1]]);

    assert!(matches!(
        Pipeline::new(0..3).chunks(0),
        Err(Error::InvalidSize { name: "chunk size", value: 0 })
    ));
    assert!(Pipeline::new(0..3).window(0).is_err());

    let mut cursor = Pipeline::new(0..4).window_cursor(2)?;
    let mut sums = Vec::new();
    while let Some(window) = cursor.next_window() {
        sums.push(window.iter().sum::<i32>());
    }
    assert_eq!(sums, vec![1, 3, 5]);

    let head: Vec<_> = Pipeline::new(0..2).firsts(4, -1).collect();
    assert_eq!(head, vec![0, 1, -1, -1]);
    let tail: Vec<_> = Pipeline::new(0..2).lasts(4, -1).collect();
    assert_eq!(tail, vec![-1, -1, 0, 1]);
    Ok(())
}

#[test]
fn test_firsts_leaves_the_rest() -> Result<()> {
    let mut pipeline = Pipeline::new(0..10);
    let head: Vec<_> = pipeline.borrowed()?.firsts(3, 0).collect();
    assert_eq!(head, vec![0, 1, 2]);
    assert_eq!(pipeline.try_next()?, Some(3));
    Ok(())
}

#[test]
fn test_operators() -> Result<()> {
    let combined = (Pipeline::new(0..3) + vec![10]) - vec![1];
    assert_eq!(combined.to_vec()?, vec![0, 2, 10]);

    let repeated = 3_usize * Pipeline::new(vec!['x']);
    assert_eq!(repeated.join("")?, "xxx");

    let text = Pipeline::new(vec!["ab".to_string()]).difference_source(Source::scalar("ab".to_string()));
    assert_eq!(text.count()?, 0);
    Ok(())
}

#[test]
fn test_construction_from_sources() {
    let pipeline = Pipeline::from_sources(vec![Source::sequence(vec![1, 2]), Source::sequence(3..5)]);
    assert_eq!(pipeline.and_then(Pipeline::to_vec), Ok(vec![1, 2, 3, 4]));

    let error = Pipeline::from_sources(vec![Source::sequence(vec![1]), Source::scalar(2)]).unwrap_err();
    assert_eq!(
        error,
        Error::NotIterable {
            position: 1,
            type_name: "i32",
            value: "2".to_string()
        }
    );

    let concatenated: Vec<_> = Pipeline::concat(vec![0..2, 5..6]).collect();
    assert_eq!(concatenated, vec![0, 1, 5]);
}

#[test]
fn test_eager_operations() -> Result<()> {
    assert_eq!(Pipeline::new(vec![3, 1, 2]).sorted()?.to_vec()?, vec![1, 2, 3]);

    let by_len = Pipeline::new(vec!["bb", "a", "cc", "ddd"])
        .sorted_by_key(|s| s.len(), SortOptions::reversed())?
        .to_vec()?;
    assert_eq!(by_len, vec!["ddd", "bb", "cc", "a"]);

    assert_eq!(Pipeline::new(1..5).reduce(|a, b| a * b)?, Some(24));
    assert_eq!(Pipeline::new(1..5).fold(10, |a, b| a + b)?, 20);
    assert_eq!(Pipeline::<i32>::empty().reduce(|a, b| a + b)?, None);

    assert_eq!(Pipeline::new(0..3).join(", ")?, "0, 1, 2");
    let options = JoinOptions::separated("|").template("<{}>");
    assert_eq!(Pipeline::new(0..3).join_with(&options, TemplateFormatter)?, "<0>|<1>|<2>");
    let hex = Pipeline::new(vec![10, 255]).join_with(&JoinOptions::separated(" "), |x: &i32, _: &str| format!("{x:#x}"))?;
    assert_eq!(hex, "0xa 0xff");

    assert_eq!(Pipeline::new(vec![1, 2, 3]).count()?, 3);
    assert_eq!(Pipeline::new((0..10).filter(|x| x % 3 == 0)).count()?, 4);

    let mut pipeline = Pipeline::new(0..10);
    pipeline.consume(Some(8))?;
    assert_eq!(pipeline.to_vec()?, vec![8, 9]);
    Ok(())
}

#[test]
fn test_lazy_transforms() -> Result<()> {
    let pairs: Vec<_> = Pipeline::new(vec!['a', 'b']).enumerate(1).collect();
    assert_eq!(pairs, vec![(1, 'a'), (2, 'b')]);

    let zipped: Vec<_> = Pipeline::new(0..3).zip("xy".chars()).collect();
    assert_eq!(zipped, vec![(0, 'x'), (1, 'y')]);

    let columns: Vec<_> = Pipeline::new(0..3).zip_many(vec![10..13, 20..22]).collect();
    assert_eq!(columns, vec![vec![0, 10, 20], vec![1, 11, 21]]);

    let cycled: Vec<_> = Pipeline::new(0..2).cycle().take(5).collect();
    assert_eq!(cycled, vec![0, 1, 0, 1, 0]);

    let between: Vec<_> = Pipeline::new(0..10)
        .starts_when(Condition::equals(3))
        .stops_when(|x: &i32| *x > 5)
        .collect();
    assert_eq!(between, vec![3, 4, 5]);

    let strided = Pipeline::new(0..10).filter(|x| x % 2 == 1).stride(2)?.to_vec()?;
    assert_eq!(strided, vec![1, 5, 9]);
    Ok(())
}

#[test]
fn test_random_sampling() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);

    let sample = Pipeline::new(0..10).sample(&mut rng, SampleOptions::items(3))?;
    assert_eq!(sample.len(), 3);
    assert_eq!(sample.iter().collect::<HashSet<_>>().len(), 3);

    let error = Pipeline::new(0..2).sample(&mut rng, SampleOptions::items(3)).unwrap_err();
    assert_eq!(error, Error::SampleTooLarge { requested: 3, available: 2 });

    let short = Pipeline::new(0..2).sample(&mut rng, SampleOptions::items(3).truncating())?;
    assert_eq!(short.len(), 2);

    let picked = Pipeline::new(0..10).choose(&mut rng, -1)?;
    assert!((0..10).contains(&picked));
    assert_eq!(Pipeline::new(Vec::<i32>::new()).choose(&mut rng, -1)?, -1);
    Ok(())
}
