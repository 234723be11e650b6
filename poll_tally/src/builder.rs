pub use crate::config::*;

use log::debug;

/// A builder for assembling a poll from the raw strings of a document.
///
/// Result groups are opened in order with [`Builder::group`], and each result is
/// attached to the group opened last.
///
/// ```
/// use poll_tally::builder::Builder;
///
/// let mut builder = Builder::new("suggested_numplayers");
/// builder.group(Some("4"));
/// builder.add_result("Best", Some("10"));
/// builder.add_result("Not Recommended", Some("lots"));
///
/// let poll = builder.build();
/// assert_eq!(poll.groups[0].results[1].votes, 0);
/// ```
pub struct Builder {
    pub(crate) _name: String,
    pub(crate) _groups: Vec<ResultGroup>,
}

impl Builder {
    pub fn new(name: &str) -> Builder {
        Builder {
            _name: name.to_string(),
            _groups: Vec::new(),
        }
    }

    /// Opens a new result group keyed by the raw grouping attribute, if any.
    pub fn group(&mut self, key: Option<&str>) -> &mut Builder {
        self._groups.push(ResultGroup {
            key: key.map(|k| k.to_string()),
            results: Vec::new(),
        });
        self
    }

    /// Adds a result with a raw vote count, as found in the document.
    ///
    /// A missing or malformed count is recorded as zero votes.
    pub fn add_result(&mut self, value: &str, num_votes: Option<&str>) -> &mut Builder {
        let votes = parse_vote_count(num_votes);
        self.add_result_count(value, votes)
    }

    /// Adds a result with an already parsed vote count.
    ///
    /// Results added before any group is opened land in an unkeyed group.
    pub fn add_result_count(&mut self, value: &str, votes: u64) -> &mut Builder {
        if self._groups.is_empty() {
            self.group(None);
        }
        if let Some(g) = self._groups.last_mut() {
            g.results.push(VoteResult {
                value: value.trim().to_string(),
                votes,
            });
        }
        self
    }

    pub fn build(self) -> Poll {
        Poll {
            name: self._name,
            groups: self._groups,
        }
    }
}

/// Reads a vote count, treating anything that is not a non-negative integer as zero.
pub fn parse_vote_count(raw: Option<&str>) -> u64 {
    match raw.map(|s| s.trim()) {
        None | Some("") => 0,
        Some(s) => match s.parse::<u64>() {
            Ok(x) => x,
            Err(_) => {
                debug!("parse_vote_count: malformed vote count {:?}", s);
                0
            }
        },
    }
}
