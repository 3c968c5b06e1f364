use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Serialize, Serializer};

/// One of the 50 US states accepted by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsState {
    Alabama,
    Alaska,
    Arizona,
    Arkansas,
    California,
    Colorado,
    Connecticut,
    Delaware,
    Florida,
    Georgia,
    Hawaii,
    Idaho,
    Illinois,
    Indiana,
    Iowa,
    Kansas,
    Kentucky,
    Louisiana,
    Maine,
    Maryland,
    Massachusetts,
    Michigan,
    Minnesota,
    Mississippi,
    Missouri,
    Montana,
    Nebraska,
    Nevada,
    NewHampshire,
    NewJersey,
    NewMexico,
    NewYork,
    NorthCarolina,
    NorthDakota,
    Ohio,
    Oklahoma,
    Oregon,
    Pennsylvania,
    RhodeIsland,
    SouthCarolina,
    SouthDakota,
    Tennessee,
    Texas,
    Utah,
    Vermont,
    Virginia,
    Washington,
    WestVirginia,
    Wisconsin,
    Wyoming,
}

/// Key -> state lookup, built once from `UsState::ALL`
static STATE_INDEX: LazyLock<HashMap<String, UsState>> = LazyLock::new(|| {
    UsState::ALL
        .iter()
        .map(|&state| (normalization_key(state.name()), state))
        .collect()
});

impl UsState {
    /// All states in alphabetical order
    pub const ALL: [UsState; 50] = [
        UsState::Alabama,
        UsState::Alaska,
        UsState::Arizona,
        UsState::Arkansas,
        UsState::California,
        UsState::Colorado,
        UsState::Connecticut,
        UsState::Delaware,
        UsState::Florida,
        UsState::Georgia,
        UsState::Hawaii,
        UsState::Idaho,
        UsState::Illinois,
        UsState::Indiana,
        UsState::Iowa,
        UsState::Kansas,
        UsState::Kentucky,
        UsState::Louisiana,
        UsState::Maine,
        UsState::Maryland,
        UsState::Massachusetts,
        UsState::Michigan,
        UsState::Minnesota,
        UsState::Mississippi,
        UsState::Missouri,
        UsState::Montana,
        UsState::Nebraska,
        UsState::Nevada,
        UsState::NewHampshire,
        UsState::NewJersey,
        UsState::NewMexico,
        UsState::NewYork,
        UsState::NorthCarolina,
        UsState::NorthDakota,
        UsState::Ohio,
        UsState::Oklahoma,
        UsState::Oregon,
        UsState::Pennsylvania,
        UsState::RhodeIsland,
        UsState::SouthCarolina,
        UsState::SouthDakota,
        UsState::Tennessee,
        UsState::Texas,
        UsState::Utah,
        UsState::Vermont,
        UsState::Virginia,
        UsState::Washington,
        UsState::WestVirginia,
        UsState::Wisconsin,
        UsState::Wyoming,
    ];

    /// Canonical display name, e.g. "New York"
    pub fn name(self) -> &'static str {
        match self {
            UsState::Alabama => "Alabama",
            UsState::Alaska => "Alaska",
            UsState::Arizona => "Arizona",
            UsState::Arkansas => "Arkansas",
            UsState::California => "California",
            UsState::Colorado => "Colorado",
            UsState::Connecticut => "Connecticut",
            UsState::Delaware => "Delaware",
            UsState::Florida => "Florida",
            UsState::Georgia => "Georgia",
            UsState::Hawaii => "Hawaii",
            UsState::Idaho => "Idaho",
            UsState::Illinois => "Illinois",
            UsState::Indiana => "Indiana",
            UsState::Iowa => "Iowa",
            UsState::Kansas => "Kansas",
            UsState::Kentucky => "Kentucky",
            UsState::Louisiana => "Louisiana",
            UsState::Maine => "Maine",
            UsState::Maryland => "Maryland",
            UsState::Massachusetts => "Massachusetts",
            UsState::Michigan => "Michigan",
            UsState::Minnesota => "Minnesota",
            UsState::Mississippi => "Mississippi",
            UsState::Missouri => "Missouri",
            UsState::Montana => "Montana",
            UsState::Nebraska => "Nebraska",
            UsState::Nevada => "Nevada",
            UsState::NewHampshire => "New Hampshire",
            UsState::NewJersey => "New Jersey",
            UsState::NewMexico => "New Mexico",
            UsState::NewYork => "New York",
            UsState::NorthCarolina => "North Carolina",
            UsState::NorthDakota => "North Dakota",
            UsState::Ohio => "Ohio",
            UsState::Oklahoma => "Oklahoma",
            UsState::Oregon => "Oregon",
            UsState::Pennsylvania => "Pennsylvania",
            UsState::RhodeIsland => "Rhode Island",
            UsState::SouthCarolina => "South Carolina",
            UsState::SouthDakota => "South Dakota",
            UsState::Tennessee => "Tennessee",
            UsState::Texas => "Texas",
            UsState::Utah => "Utah",
            UsState::Vermont => "Vermont",
            UsState::Virginia => "Virginia",
            UsState::Washington => "Washington",
            UsState::WestVirginia => "West Virginia",
            UsState::Wisconsin => "Wisconsin",
            UsState::Wyoming => "Wyoming",
        }
    }

    /// Lookup key for this state, e.g. "new-york"
    pub fn key(self) -> String {
        normalization_key(self.name())
    }

    /// Look up free-text input against the state table
    pub fn from_input(input: &str) -> Option<UsState> {
        STATE_INDEX.get(&normalization_key(input)).copied()
    }

    /// Canonical names joined with ", " for user-facing messages
    pub fn name_list() -> String {
        UsState::ALL
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for UsState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Derive the lookup key for free-text state input.
///
/// Lower-cases, strips surrounding punctuation and whitespace, then collapses
/// every whitespace run to a single hyphen.
pub fn normalization_key(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = lowered
        .trim()
        .trim_matches(|c: char| c.is_ascii_punctuation() && c != '-')
        .trim();

    stripped.split_whitespace().collect::<Vec<_>>().join("-")
}
