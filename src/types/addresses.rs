//! Built-in Uniswap V2 style factory tables per network

// Ethereum mainnet factories
pub const FACTORIES_MAINNET: &[(&str, &str)] = &[
    ("uniswap_v2", "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
    ("sushiswap", "0xC0AEe478e3658e2610c5F7A4A2E1777cE9e4f2Ac"),
    ("shibaswap", "0x115934131916C8b277DD010Ee02de363c09d037c"),
];

// Base mainnet factories
pub const FACTORIES_BASE: &[(&str, &str)] = &[
    ("uniswap_v2", "0x8909Dc15e40173Ff4699343b6eB8132c65e18eC6"),
    ("sushiswap", "0x71524B4f93c58fcbF659783284E38825f0622859"),
    ("baseswap", "0xFDa619b6d20975be80A10332cD39b9a4b0FAa8BB"),
];

/// Factory table for a network name, `None` for networks without one.
pub fn builtin_factories(network: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match network {
        "mainnet" => Some(FACTORIES_MAINNET),
        "base" => Some(FACTORIES_BASE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use std::str::FromStr;

    #[test]
    fn builtin_tables_parse() {
        for (name, address) in FACTORIES_MAINNET.iter().chain(FACTORIES_BASE) {
            assert!(Address::from_str(address).is_ok(), "{name} has a bad address");
        }
    }

    #[test]
    fn unknown_network_has_no_table() {
        assert!(builtin_factories("sepolia").is_none());
        assert_eq!(builtin_factories("base").map(|t| t.len()), Some(3));
    }
}
