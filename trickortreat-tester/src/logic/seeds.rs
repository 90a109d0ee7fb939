use anyhow::{Context, Result, bail};
use std::collections::HashSet;

use crate::util::now_millis;

/// Widest range a single token may expand to.
const MAX_RANGE: u64 = 10_000;

/// Resolve CLI seed tokens into start clocks (milliseconds).
///
/// Accepts integers, `a..b` / `a..=b` ranges and the keyword `now`.
/// Duplicates are dropped and first-seen order is kept.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for token in tokens {
        for seed in expand_token(token)? {
            if seen.insert(seed) {
                seeds.push(seed);
            }
        }
    }

    if seeds.is_empty() {
        bail!("No seeds given");
    }
    Ok(seeds)
}

fn expand_token(token: &str) -> Result<Vec<u64>> {
    if token.eq_ignore_ascii_case("now") {
        return Ok(vec![now_millis()]);
    }

    if let Some((start, end)) = token.split_once("..") {
        let (end, inclusive) = end
            .strip_prefix('=')
            .map_or((end, false), |rest| (rest, true));
        let start = parse_seed(start).with_context(|| format!("bad range start in {token}"))?;
        let mut end = parse_seed(end).with_context(|| format!("bad range end in {token}"))?;
        if inclusive {
            end = end.saturating_add(1);
        }
        if end <= start {
            bail!("Empty seed range: {token}");
        }
        if end - start > MAX_RANGE {
            bail!("Seed range {token} is wider than {MAX_RANGE}");
        }
        return Ok((start..end).collect());
    }

    parse_seed(token)
        .map(|seed| vec![seed])
        .with_context(|| format!("Unrecognized seed token: {token}"))
}

fn parse_seed(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u64>() {
        return Ok(value);
    }
    let value = raw.parse::<i64>()?;
    Ok(value.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn integers_and_ranges_expand_in_order() {
        let seeds = resolve_seed_inputs(&tokens(&["7", "1..3", "5..=6"])).unwrap();
        assert_eq!(seeds, vec![7, 1, 2, 5, 6]);
    }

    #[test]
    fn duplicates_are_dropped() {
        let seeds = resolve_seed_inputs(&tokens(&["3", "1..5", "3"])).unwrap();
        assert_eq!(seeds, vec![3, 1, 2, 4]);
    }

    #[test]
    fn negative_values_fold_to_magnitude() {
        assert_eq!(resolve_seed_inputs(&tokens(&["-42"])).unwrap(), vec![42]);
    }

    #[test]
    fn bad_tokens_are_errors() {
        assert!(resolve_seed_inputs(&tokens(&["pumpkin"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["9..2"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["0..20000"])).is_err());
        assert!(resolve_seed_inputs(&[]).is_err());
    }

    #[test]
    fn now_keyword_reads_the_clock() {
        let seeds = resolve_seed_inputs(&tokens(&["now"])).unwrap();
        assert!(seeds[0] > 1_600_000_000_000);
    }
}
