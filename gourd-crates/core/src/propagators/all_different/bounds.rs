use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::PropagationContext;
use crate::engine::variables::OffsetView;

/// One pass over every interval `[lo, hi]` spanned by a lower-bound and an upper-bound of the
/// variables. If more variables lie within the interval than it has values the constraint fails;
/// if exactly as many, the interval is a Hall interval and is cut off the bounds of every other
/// variable.
pub(super) fn prune_hall_intervals(
    variables: &[OffsetView],
    context: &mut PropagationContext<'_>,
) -> PropagationStatusCP {
    let bounds = variables
        .iter()
        .map(|var| {
            (
                i64::from(context.lower_bound(var)),
                i64::from(context.upper_bound(var)),
            )
        })
        .collect::<Vec<_>>();

    let mut lows = bounds.iter().map(|&(lower, _)| lower).collect::<Vec<_>>();
    lows.sort_unstable();
    lows.dedup();
    let mut highs = bounds.iter().map(|&(_, upper)| upper).collect::<Vec<_>>();
    highs.sort_unstable();
    highs.dedup();

    for &lo in &lows {
        for &hi in highs.iter().filter(|&&hi| hi >= lo) {
            let capacity = hi - lo + 1;
            let num_inside = bounds
                .iter()
                .filter(|&&(lower, upper)| lo <= lower && upper <= hi)
                .count() as i64;

            if num_inside > capacity {
                return Err(EmptyDomain);
            }
            if num_inside == capacity {
                cut_interval(variables, context, lo, hi)?;
            }
        }
    }

    Ok(())
}

fn cut_interval(
    variables: &[OffsetView],
    context: &mut PropagationContext<'_>,
    lo: i64,
    hi: i64,
) -> PropagationStatusCP {
    for var in variables {
        let lower = i64::from(context.lower_bound(var));
        let upper = i64::from(context.upper_bound(var));
        if lo <= lower && upper <= hi {
            continue;
        }

        if (lo..=hi).contains(&lower) {
            context.set_lower_bound(var, saturate(hi + 1))?;
        }
        let upper = i64::from(context.upper_bound(var));
        if (lo..=hi).contains(&upper) {
            context.set_upper_bound(var, saturate(lo - 1))?;
        }
    }

    Ok(())
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
