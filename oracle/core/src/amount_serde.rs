// Copyright (c) 2024 The Botho Foundation

//! Serde helpers writing 256-bit amounts as decimal strings.

use primitive_types::U256;
use serde::{self, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(amount: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(amount)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    U256::from_dec_str(&s).map_err(|e| serde::de::Error::custom(format!("{e:?}")))
}
