use crate::{error::SargError, interval::Interval, sequence::IntervalSequence};
use std::{cmp::Ordering, mem};

pub(super) fn merge_sequences(
    sequences: Vec<IntervalSequence>,
) -> Result<IntervalSequence, SargError> {
    merge(sequences.into_iter().flatten().collect())
}

/// Merge arbitrary intervals into a canonical sequence.
///
/// The sweep only ever extends the accumulator's upper bound, so the input
/// must be sorted by (lower, upper) first.
pub(super) fn merge(mut intervals: Vec<Interval>) -> Result<IntervalSequence, SargError> {
    sort_intervals(&mut intervals)?;

    let mut merged = Vec::with_capacity(intervals.len());
    let mut intervals = intervals.into_iter();
    let Some(mut acc) = intervals.next() else {
        return Ok(IntervalSequence::new());
    };

    for next in intervals {
        if acc.contains(&next)? {
            continue;
        }

        let mut cmp = next.lower().try_cmp(acc.upper())?;
        if cmp == Ordering::Greater && acc.upper().is_touching(next.lower())? {
            cmp = Ordering::Less;
        }

        if cmp == Ordering::Greater {
            merged.push(mem::replace(&mut acc, next));
        } else {
            acc = acc.with_upper(next.upper().clone());
        }
    }
    merged.push(acc);

    Ok(IntervalSequence::from_intervals(merged))
}

// Sort by (lower, upper). Every coordinate is checked for orderability
// up front so the comparator below is total.
fn sort_intervals(intervals: &mut [Interval]) -> Result<(), SargError> {
    check_orderable(intervals)?;

    intervals.sort_by(|a, b| compare_intervals(a, b).unwrap_or(Ordering::Equal));

    Ok(())
}

fn compare_intervals(a: &Interval, b: &Interval) -> Result<Ordering, SargError> {
    Ok(a.lower()
        .try_cmp(b.lower())?
        .then(a.upper().try_cmp(b.upper())?))
}

// Literals order among themselves and a parameter only against itself, so
// comparing every non-null coordinate with the first one is enough.
fn check_orderable(intervals: &[Interval]) -> Result<(), SargError> {
    let mut coordinates = intervals
        .iter()
        .flat_map(|interval| [interval.lower().coordinate(), interval.upper().coordinate()])
        .flatten()
        .filter(|coordinate| !coordinate.is_null());

    let Some(first) = coordinates.next() else {
        return Ok(());
    };
    for coordinate in coordinates {
        first.try_cmp(coordinate)?;
    }

    Ok(())
}
