// Composition of the flat row of one item.

use poll_tally::range_for_outcomes;
use serde::Serialize;

use crate::dump::polls::*;
use crate::dump::record::*;
use crate::dump::*;

/// Name of the rank entry that holds the overall rank of a game.
const OVERALL_RANK_NAME: &str = "boardgame";
/// Rank entries of this type describe the item itself, not a category.
const EXCLUDED_RANK_TYPE: &str = "subtype";
const RANK_SUFFIX: &str = "rank";

const COMMUNITY_LABELS: [&str; 2] = ["best", "recommended"];
const BEST_LABELS: [&str; 1] = ["best"];

/// The flat record of one item. Every field is either a value or `N/A`.
///
/// The field order is the column order of the exports.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct NormalizedRow {
    #[serde(rename = "Rank")]
    pub rank: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Weight")]
    pub weight: String,
    #[serde(rename = "Type")]
    pub type_label: String,
    #[serde(rename = "Min Players")]
    pub min_players: String,
    #[serde(rename = "Max Players")]
    pub max_players: String,
    #[serde(rename = "Community Player Count Min")]
    pub community_player_min: String,
    #[serde(rename = "Community Player Count Max")]
    pub community_player_max: String,
    #[serde(rename = "Community Best Player Count Min")]
    pub community_best_player_min: String,
    #[serde(rename = "Community Best Player Count Max")]
    pub community_best_player_max: String,
    #[serde(rename = "Playing Time Min")]
    pub playing_time_min: String,
    #[serde(rename = "Playing Time Max")]
    pub playing_time_max: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Community Age")]
    pub community_age: String,
    #[serde(rename = "Designers")]
    pub designers: String,
    #[serde(rename = "Artists")]
    pub artists: String,
    #[serde(rename = "Categories")]
    pub categories: String,
}

/// The identifier of an item, for diagnostics.
pub fn item_id<N: RecordNode>(item: &N) -> Option<String> {
    item.attr("objectid")
        .or_else(|| item.attr("id"))
        .map(|s| s.to_string())
}

pub fn format_numeric(value: Option<u32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn missing_if_empty(s: String) -> String {
    if s.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        s
    }
}

// "Strategy Game Rank" -> "Strategy Game"
fn strip_rank_suffix(label: &str) -> &str {
    let split = label.len().checked_sub(RANK_SUFFIX.len());
    match split {
        Some(idx)
            if label.is_char_boundary(idx) && label[idx..].eq_ignore_ascii_case(RANK_SUFFIX) =>
        {
            label[..idx].trim()
        }
        _ => label,
    }
}

fn overall_rank<N: RecordNode>(ranks: &[N]) -> String {
    ranks
        .iter()
        .find(|r| r.attr("name") == Some(OVERALL_RANK_NAME))
        .and_then(|r| r.attr("value"))
        .map(|v| missing_if_empty(v.trim().to_string()))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// The `label(value)` pairs of all the category ranks.
fn type_label<N: RecordNode>(ranks: &[N]) -> String {
    let mut entries: Vec<String> = Vec::new();
    for r in ranks.iter() {
        let r_type = r.attr("type").unwrap_or("").trim();
        if r_type.is_empty() || r_type.eq_ignore_ascii_case(EXCLUDED_RANK_TYPE) {
            continue;
        }
        let friendly = r
            .attr("friendlyname")
            .filter(|s| !s.is_empty())
            .or_else(|| r.attr("name"))
            .unwrap_or("")
            .trim();
        let label = match strip_rank_suffix(friendly) {
            "" => r_type,
            l => l,
        };
        let value = match r.attr("value") {
            Some(v) if !v.is_empty() => v,
            _ => NOT_AVAILABLE,
        };
        entries.push(format!("{}({})", label, value));
    }
    missing_if_empty(entries.join(", "))
}

/// Dedicated tags first, typed links when the item has none of them.
fn tag_or_link<N: RecordNode>(item: N, tag: &str) -> String {
    let from_tags = join_tag_values(item, tag);
    if from_tags == NOT_AVAILABLE {
        extract_link_values(item, tag)
    } else {
        from_tags
    }
}

fn primary_name<N: RecordNode>(item: N) -> String {
    item.find_all("name")
        .into_iter()
        .find(|n| n.attr("primary") == Some("true") || n.attr("type") == Some("primary"))
        .and_then(|n| node_value(&n))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Builds the row of one item.
///
/// Fails only when the item has no `statistics/ratings` block.
pub fn compose_row<N: RecordNode>(item: N) -> DumpResult<NormalizedRow> {
    let ratings = item
        .find_first("statistics")
        .and_then(|s| s.find_first("ratings"))
        .context(MissingRatingsSnafu {
            item_id: item_id(&item).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })?;
    let ranks = ratings.find_all("rank");

    let outcomes = parse_poll_numplayers_outcomes(item, NUMPLAYERS_POLL);
    let community = range_for_outcomes(&outcomes, &COMMUNITY_LABELS);
    let best = range_for_outcomes(&outcomes, &BEST_LABELS);

    Ok(NormalizedRow {
        rank: overall_rank(&ranks),
        title: primary_name(item),
        year: find_tag_value(item, "yearpublished"),
        rating: find_tag_value(ratings, "average"),
        weight: find_tag_value(ratings, "averageweight"),
        type_label: type_label(&ranks),
        min_players: find_tag_value(item, "minplayers"),
        max_players: find_tag_value(item, "maxplayers"),
        community_player_min: format_numeric(community.min),
        community_player_max: format_numeric(community.max),
        community_best_player_min: format_numeric(best.min),
        community_best_player_max: format_numeric(best.max),
        playing_time_min: find_tag_value(item, "minplaytime"),
        playing_time_max: find_tag_value(item, "maxplaytime"),
        age: join_tag_values(item, "age"),
        community_age: parse_poll_top_value(item, PLAYERAGE_POLL)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        designers: tag_or_link(item, "boardgamedesigner"),
        artists: tag_or_link(item, "boardgameartist"),
        categories: tag_or_link(item, "boardgamecategory"),
    })
}
