// Reading the community polls of an item.

use poll_tally::builder::Builder;
use poll_tally::{group_outcomes, top_value, Poll, PollOutcome, TallyRules};

use crate::dump::*;

pub const NUMPLAYERS_POLL: &str = "suggested_numplayers";
pub const PLAYERAGE_POLL: &str = "suggested_playerage";

/// Builds the poll with the given name out of the item, if the item has one.
///
/// Every `<results>` element becomes a result group keyed by its `numplayers`
/// attribute, and every `<result>` inside it a vote result.
pub fn read_poll<N: RecordNode>(item: N, poll_name: &str) -> Option<Poll> {
    let poll_node = item
        .find_all("poll")
        .into_iter()
        .find(|p| p.attr("name") == Some(poll_name))?;

    let mut builder = Builder::new(poll_name);
    for results in poll_node.find_all("results") {
        builder.group(results.attr("numplayers"));
        for result in results.find_all("result") {
            builder.add_result(result.attr("value").unwrap_or(""), result.attr("numvotes"));
        }
    }
    Some(builder.build())
}

/// The consensus label of every player count of the poll, or nothing if the item
/// does not have this poll.
pub fn parse_poll_numplayers_outcomes<N: RecordNode>(item: N, poll_name: &str) -> Vec<PollOutcome> {
    match read_poll(item, poll_name) {
        Some(poll) => group_outcomes(&poll, &TallyRules::DEFAULT_RULES),
        None => {
            debug!("parse_poll_numplayers_outcomes: no poll {}", poll_name);
            vec![]
        }
    }
}

pub fn parse_poll_top_value<N: RecordNode>(item: N, poll_name: &str) -> Option<String> {
    read_poll(item, poll_name).and_then(|poll| top_value(&poll))
}
