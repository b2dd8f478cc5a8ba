/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rear_coded_dict::{EngineOptions, Error, Lprc, Psrc};

fn words() -> Vec<Vec<u8>> {
    [
        "apple", "application", "apply", "banana", "band", "bandana", "cat", "caterpillar",
        "category", "dog", "dogma",
    ]
    .iter()
    .map(|s| s.as_bytes().to_vec())
    .collect()
}

#[test]
fn lprc_decodes_every_stored_string() -> Result<(), Error> {
    let mut words = words();
    words.sort();
    let mut lprc = Lprc::new(EngineOptions::new(1.0)?);
    lprc.populate(words.clone())?;

    assert_eq!(lprc.len(), words.len());
    for (i, word) in words.iter().enumerate() {
        let len = lprc.string_length(i)?;
        assert_eq!(&lprc.retrieval(i, len)?, word);
    }
    Ok(())
}

#[test]
fn lprc_full_prefix_search_matches_naive_filter() -> Result<(), Error> {
    let mut words = words();
    words.sort();
    let mut lprc = Lprc::new(EngineOptions::new(0.5)?);
    lprc.populate(words.clone())?;

    for prefix in ["app", "ban", "cat", "dog", "z"] {
        let mut expected: Vec<_> = words
            .iter()
            .filter(|w| w.starts_with(prefix.as_bytes()))
            .cloned()
            .collect();
        expected.sort();
        let mut got = lprc.full_prefix_search(prefix.as_bytes())?;
        got.sort();
        assert_eq!(got, expected, "prefix {prefix:?}");
    }
    Ok(())
}

#[test]
fn psrc_decodes_every_stored_string() -> Result<(), Error> {
    let mut words = words();
    words.sort();
    let mut psrc = Psrc::new(EngineOptions::new(1.0)?);
    psrc.populate(words.clone())?;

    for (i, word) in words.iter().enumerate() {
        let total = psrc.string_length(i)?;
        assert_eq!(&psrc.retrieval(i, total - 8)?, word);
    }
    Ok(())
}

#[test]
fn psrc_full_prefix_search_matches_naive_filter() -> Result<(), Error> {
    let mut words = words();
    words.sort();
    let mut psrc = Psrc::new(EngineOptions::new(0.5)?);
    psrc.populate(words.clone())?;

    for prefix in ["app", "ban", "cat", "dog", "z"] {
        let mut expected: Vec<_> = words
            .iter()
            .filter(|w| w.starts_with(prefix.as_bytes()))
            .cloned()
            .collect();
        expected.sort();
        let mut got = psrc.full_prefix_search(prefix.as_bytes())?;
        got.sort();
        assert_eq!(got, expected, "prefix {prefix:?}");
    }
    Ok(())
}

/// Strings sharing a long common suffix but almost no common prefix, so
/// consecutive sorted entries are cheaper to encode as a differing prefix
/// than a differing suffix and PSRC's prefix direction is actually hit.
fn suffix_heavy_words() -> Vec<Vec<u8>> {
    [
        "aaaa_common_tail",
        "bbbb_common_tail",
        "cccc_common_tail",
        "dddd_common_tail",
        "eeee_common_tail",
    ]
    .iter()
    .map(|s| s.as_bytes().to_vec())
    .collect()
}

#[test]
fn psrc_decodes_strings_stored_in_the_prefix_direction() -> Result<(), Error> {
    let mut words = suffix_heavy_words();
    words.sort();
    let mut psrc = Psrc::new(EngineOptions::new(1.0)?);
    psrc.populate(words.clone())?;

    for (i, word) in words.iter().enumerate() {
        let total = psrc.string_length(i)?;
        assert_eq!(&psrc.retrieval(i, total - 8)?, word);
    }
    assert_eq!(psrc.full_prefix_search(b"cccc")?, vec![b"cccc_common_tail".to_vec()]);
    Ok(())
}

#[test]
fn retrieval_before_populate_is_not_initialized() {
    let lprc = Lprc::new(EngineOptions::default());
    assert!(matches!(lprc.retrieval(0, 8), Err(Error::NotInitialized)));
}

#[test]
fn large_batch_exercises_accelerated_rank_select() -> Result<(), Error> {
    let words: Vec<Vec<u8>> = (0..12_000).map(|i| format!("key-{i:06}").into_bytes()).collect();
    let mut lprc = Lprc::new(EngineOptions::new(1.0)?.with_accel_threshold(1_000));
    lprc.populate(words.clone())?;

    let mut sorted = words;
    sorted.sort();
    for i in (0..sorted.len()).step_by(777) {
        let len = lprc.string_length(i)?;
        assert_eq!(&lprc.retrieval(i, len)?, &sorted[i]);
    }
    Ok(())
}
