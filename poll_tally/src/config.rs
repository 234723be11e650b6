// ********* Input data structures ***********

/// One candidate value inside a result group, with the number of votes it received.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteResult {
    pub value: String,
    pub votes: u64,
}

/// A partition of a poll.
///
/// The key is the raw grouping attribute (for example the player count) and is
/// kept as written in the document. It is only interpreted when outcomes are computed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResultGroup {
    pub key: Option<String>,
    pub results: Vec<VoteResult>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Poll {
    pub name: String,
    pub groups: Vec<ResultGroup>,
}

// ******** Output data structures *********

/// The consensus label of one result group.
///
/// Only produced for groups whose winning vote count is strictly positive.
/// The label is always lower case.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollOutcome {
    pub group_key: u32,
    pub label: String,
}

/// Smallest and largest group key among the matching outcomes.
///
/// Either both bounds are set (and `min <= max`) or neither is.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct CountRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl CountRange {
    pub const EMPTY: CountRange = CountRange {
        min: None,
        max: None,
    };

    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }
}

// ********* Configuration **********

/// How ties between the top-voted labels of a group are broken.
///
/// The tied labels are compared in lower case against `preferred_labels`, in order.
/// When none of them is preferred, the first tied label in document order wins.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyRules {
    pub preferred_labels: &'static [&'static str],
}

impl TallyRules {
    pub const DEFAULT_RULES: TallyRules = TallyRules {
        preferred_labels: &["best", "recommended"],
    };
}

impl Default for TallyRules {
    fn default() -> Self {
        TallyRules::DEFAULT_RULES
    }
}
