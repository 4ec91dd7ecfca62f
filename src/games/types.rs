use crate::games::history::HistoryLog;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Balance every fresh or reset game starts with
pub const DEFAULT_BALANCE: u64 = 1000;

/// Rolls at or above this value win
pub const WINNING_THRESHOLD: u8 = 4;

/// Face of a six-sided die
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Roll(u8);

impl Roll {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;
    /// Every face, lowest first
    pub const FACES: [Roll; 6] = [Roll(1), Roll(2), Roll(3), Roll(4), Roll(5), Roll(6)];

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_win(self) -> bool {
        self.0 >= WINNING_THRESHOLD
    }
}

impl TryFrom<u8> for Roll {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Roll::new(value).ok_or_else(|| format!("roll {} outside {}..={}", value, Roll::MIN, Roll::MAX))
    }
}

impl From<Roll> for u8 {
    fn from(roll: Roll) -> Self {
        roll.0
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server/client seed pair mixed into every verification hash
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Seeds {
    pub server_seed: String,
    pub client_seed: String,
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            server_seed: "secret-server-seed".to_string(),
            client_seed: "user-client-seed".to_string(),
        }
    }
}

/// One settled bet. Never mutated after it is appended to the history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub roll: Roll,
    pub bet: u64,
    pub win: bool,
    pub new_balance: u64,
    /// Absent in files written before hashes were recorded
    #[serde(default)]
    pub hash: String,
    pub server_seed: String,
    pub client_seed: String,
    pub nonce: String,
    #[serde(with = "millis_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    /// Current instant at the millisecond precision the history file uses
    pub fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// RFC 3339 in UTC, always with exactly three fractional digits
mod millis_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

/// Everything the backing store holds: the balance plus the full history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedState {
    pub balance: u64,
    #[serde(default)]
    pub history: HistoryLog,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            balance: DEFAULT_BALANCE,
            history: HistoryLog::default(),
        }
    }
}

/// What a successful bet returns to the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BetReceipt {
    pub roll: Roll,
    pub win: bool,
    pub new_balance: u64,
    pub hash: String,
}
