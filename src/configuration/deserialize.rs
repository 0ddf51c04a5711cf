pub mod outcome_policy {
    use crate::report::OutcomePolicy;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OutcomePolicy, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse::<OutcomePolicy>().map_err(D::Error::custom)
    }
}
