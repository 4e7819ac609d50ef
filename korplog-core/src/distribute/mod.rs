//! Apportioning a request's hits over the result window it displayed.
//!
//! The backend logs the total number of hits per corpus for the whole result
//! set, but a client only sees the ranks `[start, end]` of the concatenated
//! result list (corpora in request order). Usage statistics count the hits
//! actually shown, so each corpus is credited with its slice of the window.


use std::collections::BTreeMap;

/// Total hits per lower-cased corpus id.
pub type HitTotals = BTreeMap<String, u64>;

/// Returns `(corpus, hits shown)` for every corpus overlapping the inclusive
/// rank window `[start, end]`, in request order. Corpora contributing
/// nothing are omitted and an inverted window yields an empty list.
pub fn distribute_hits<'c, S>(
    corpora: &'c [S],
    totals: &HitTotals,
    start: u64,
    end: u64,
) -> Vec<(&'c str, u64)>
where
    S: AsRef<str>,
{
    let mut out = Vec::new();

    if start > end {
        return out;
    }

    // One past the last rank shown.
    let window_end = end.saturating_add(1);

    let mut cum_hits: u64 = 0;

    for corpus in corpora {
        let corpus = corpus.as_ref();
        let total = totals.get(corpus).copied().unwrap_or(0);

        let cum_hits_prev = cum_hits;
        cum_hits = cum_hits.saturating_add(total);

        if total > 0 && cum_hits > start {
            let mut shown = total;

            if cum_hits > window_end {
                shown -= cum_hits - window_end;
            }
            if start > cum_hits_prev {
                shown -= start - cum_hits_prev;
            }

            out.push((corpus, shown));
        }

        if cum_hits >= window_end {
            break;
        }
    }

    out
}
