/*!
Consensus outcomes for community polls.

A poll is split into result groups (one per player count for example), and every
group holds the votes cast for a handful of labels such as `Best`, `Recommended`
or `Not Recommended`. This crate reduces such polls to:

- the winning label of every group ([`group_outcomes`]),
- the single most voted value across the whole poll ([`top_value`]),
- the range of group keys whose winning label is in a target set ([`range_for_outcomes`]).

```
use poll_tally::builder::Builder;
use poll_tally::*;

let mut builder = Builder::new("suggested_numplayers");
builder
    .group(Some("4"))
    .add_result("Best", Some("10"))
    .add_result("Recommended", Some("10"))
    .add_result("Not Recommended", Some("2"));
let poll = builder.build();

let outcomes = group_outcomes(&poll, &TallyRules::DEFAULT_RULES);
assert_eq!(outcomes[0].label, "best");
let range = range_for_outcomes(&outcomes, &["best", "recommended"]);
assert_eq!((range.min, range.max), (Some(4), Some(4)));
```
*/
mod config;

pub mod builder;

use log::debug;

pub use crate::config::*;

// **** Private structures ****

// The running maximum of one result group.
// Labels tied at the maximum are kept in document order.
#[derive(Debug, Default)]
struct GroupTally<'a> {
    top_votes: Option<u64>,
    tied: Vec<&'a str>,
}

impl<'a> GroupTally<'a> {
    fn push(&mut self, value: &'a str, votes: u64) {
        match self.top_votes {
            Some(top) if votes < top => {}
            Some(top) if votes == top => self.tied.push(value),
            _ => {
                self.top_votes = Some(votes);
                self.tied = vec![value];
            }
        }
    }

    /// The consensus label, if the group has at least one positive vote.
    fn winner(&self, rules: &TallyRules) -> Option<String> {
        if self.top_votes.unwrap_or(0) == 0 {
            return None;
        }
        let lowered: Vec<String> = self
            .tied
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect();
        for preferred in rules.preferred_labels {
            if lowered.iter().any(|l| l == preferred) {
                return Some(preferred.to_string());
            }
        }
        lowered.into_iter().next()
    }
}

/// Reads a grouping key as a non-negative integer.
///
/// Keys such as `4+` or an empty key do not qualify.
fn parse_group_key(key: Option<&str>) -> Option<u32> {
    let k = key?;
    if k.is_empty() || !k.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    k.parse::<u32>().ok()
}

/// Computes the winning label of every result group of the poll.
///
/// Groups with a key that is not a plain integer and groups where no label received
/// a vote are skipped. The outcomes follow the order of the groups in the poll.
pub fn group_outcomes(poll: &Poll, rules: &TallyRules) -> Vec<PollOutcome> {
    let mut res: Vec<PollOutcome> = Vec::new();
    for group in poll.groups.iter() {
        let group_key = match parse_group_key(group.key.as_deref()) {
            Some(k) => k,
            None => {
                debug!(
                    "group_outcomes: poll {}: skipping group with key {:?}",
                    poll.name, group.key
                );
                continue;
            }
        };

        let mut tally = GroupTally::default();
        for r in group.results.iter() {
            tally.push(r.value.as_str(), r.votes);
        }

        match tally.winner(rules) {
            Some(label) => {
                debug!(
                    "group_outcomes: poll {}: group {} -> {:?} (tied: {:?})",
                    poll.name, group_key, label, tally.tied
                );
                res.push(PollOutcome { group_key, label });
            }
            None => {
                debug!(
                    "group_outcomes: poll {}: group {} has no consensus",
                    poll.name, group_key
                );
            }
        }
    }
    res
}

/// The most voted non-empty value over all the groups of the poll.
///
/// Groups are ignored: all the results are considered together. On an exact tie the
/// value seen first wins. The first non-empty value is accepted even without votes.
pub fn top_value(poll: &Poll) -> Option<String> {
    let mut top: Option<(&str, u64)> = None;
    for r in poll.groups.iter().flat_map(|g| g.results.iter()) {
        if r.value.is_empty() {
            continue;
        }
        match top {
            Some((_, votes)) if r.votes <= votes => {}
            _ => top = Some((r.value.as_str(), r.votes)),
        }
    }
    debug!("top_value: poll {}: {:?}", poll.name, top);
    top.map(|(value, _)| value.to_string())
}

/// The smallest and largest group keys among the outcomes whose label is one of
/// `target_labels` (compared without case).
pub fn range_for_outcomes(outcomes: &[PollOutcome], target_labels: &[&str]) -> CountRange {
    let keys: Vec<u32> = outcomes
        .iter()
        .filter(|o| target_labels.iter().any(|t| o.label.eq_ignore_ascii_case(t)))
        .map(|o| o.group_key)
        .collect();
    match (keys.iter().min(), keys.iter().max()) {
        (Some(min), Some(max)) => CountRange {
            min: Some(*min),
            max: Some(*max),
        },
        _ => CountRange::EMPTY,
    }
}
