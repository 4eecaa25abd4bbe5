use crate::{
    domain::SargDomain, error::SargError, interval::Interval, sequence::IntervalSequence,
};
use std::cmp::Ordering;

/// Intersect sequences pairwise, left to right.
///
/// No sequences at all is the universal set.
pub(super) fn intersect_all(
    domain: SargDomain,
    sequences: Vec<IntervalSequence>,
) -> Result<IntervalSequence, SargError> {
    let mut sequences = sequences.into_iter();
    let Some(first) = sequences.next() else {
        return Ok(IntervalSequence::from_intervals(vec![
            Interval::unconstrained(domain),
        ]));
    };

    let mut target = first.into_vec();
    for source in sequences {
        target = intersect_pair(target, &source)?;
    }

    Ok(IntervalSequence::from_intervals(target))
}

// Two-pointer sweep over two canonical sequences. The current target may be
// split when a source interval ends inside it; the suffix keeps being
// intersected against later sources.
fn intersect_pair(target: Vec<Interval>, source: &[Interval]) -> Result<Vec<Interval>, SargError> {
    let mut out = Vec::new();
    let mut targets = target.into_iter();
    let mut sources = source.iter();

    let (Some(mut t), Some(mut s)) = (targets.next(), sources.next()) else {
        return Ok(out);
    };

    loop {
        // source entirely below target
        if s.upper().try_cmp(t.lower())? == Ordering::Less {
            match sources.next() {
                Some(next) => s = next,
                None => break,
            }
            continue;
        }

        // target entirely below source
        if t.upper().try_cmp(s.lower())? == Ordering::Less {
            match targets.next() {
                Some(next) => t = next,
                None => break,
            }
            continue;
        }

        let lower = if s.lower().try_cmp(t.lower())? == Ordering::Greater {
            s.lower().clone()
        } else {
            t.lower().clone()
        };

        match s.upper().try_cmp(t.upper())? {
            Ordering::Less => {
                out.push(Interval::new(t.domain(), lower, s.upper().clone()));
                t = t.with_lower(s.upper().flipped());

                match sources.next() {
                    Some(next) => s = next,
                    None => break,
                }
            }
            Ordering::Equal => {
                out.push(t.with_lower(lower));

                match (targets.next(), sources.next()) {
                    (Some(next_t), Some(next_s)) => {
                        t = next_t;
                        s = next_s;
                    }
                    _ => break,
                }
            }
            Ordering::Greater => {
                out.push(t.with_lower(lower));

                match targets.next() {
                    Some(next) => t = next,
                    None => break,
                }
            }
        }
    }

    Ok(out)
}
