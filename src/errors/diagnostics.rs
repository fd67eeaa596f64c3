//! Diagnostics collected for every factory, pool or token that failed

use alloy::primitives::Address;
use serde::Serialize;
use tracing::{error, warn};
use super::ScanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    FactoryBind,
    PoolCount,
    PoolIndex,
    PoolData,
    TokenMetadata,
    LowReserves,
    MissingToken,
    Other,
}

/// One entry of `invalid_addresses.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lp_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erc20_address: Option<Address>,
    pub reason: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, reason: String) -> Self {
        Self {
            kind,
            factory: None,
            factory_address: None,
            index: None,
            lp_address: None,
            erc20_address: None,
            reason,
        }
    }
}

impl From<&ScanError> for Diagnostic {
    fn from(err: &ScanError) -> Self {
        let reason = err.to_string();
        match err {
            ScanError::FactoryBind { name, address, .. } => Diagnostic {
                factory: Some(name.clone()),
                factory_address: Some(address.clone()),
                ..Diagnostic::new(DiagnosticKind::FactoryBind, reason)
            },
            ScanError::PoolCount { name, factory, .. } => Diagnostic {
                factory: Some(name.clone()),
                factory_address: Some(factory.to_string()),
                ..Diagnostic::new(DiagnosticKind::PoolCount, reason)
            },
            ScanError::PoolIndex { factory, index, .. } => Diagnostic {
                factory_address: Some(factory.to_string()),
                index: Some(*index),
                ..Diagnostic::new(DiagnosticKind::PoolIndex, reason)
            },
            ScanError::PoolData { pool, factory, .. } => Diagnostic {
                factory_address: Some(factory.to_string()),
                lp_address: Some(*pool),
                ..Diagnostic::new(DiagnosticKind::PoolData, reason)
            },
            ScanError::TokenMetadata { token, pool, factory, .. } => Diagnostic {
                factory_address: Some(factory.to_string()),
                lp_address: Some(*pool),
                erc20_address: Some(*token),
                ..Diagnostic::new(DiagnosticKind::TokenMetadata, reason)
            },
            ScanError::LowReserves { pool, factory } => Diagnostic {
                factory_address: Some(factory.to_string()),
                lp_address: Some(*pool),
                ..Diagnostic::new(DiagnosticKind::LowReserves, reason)
            },
            ScanError::MissingToken { token, pool, factory } => Diagnostic {
                factory_address: Some(factory.to_string()),
                lp_address: Some(*pool),
                erc20_address: Some(*token),
                ..Diagnostic::new(DiagnosticKind::MissingToken, reason)
            },
            ScanError::Network { source, .. } => {
                Diagnostic::new(DiagnosticKind::Other, format!("{}: {:#}", reason, source))
            }
            ScanError::Output { .. } | ScanError::Config(_) => {
                Diagnostic::new(DiagnosticKind::Other, reason)
            }
        }
    }
}

/// Append-only collector threaded through the pipeline by `&mut`.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the failure and keeps a diagnostic for it.
    pub fn record(&mut self, err: ScanError) {
        let diagnostic = Diagnostic::from(&err);
        if err.is_per_entity() {
            warn!(kind = ?diagnostic.kind, "{}", err);
        } else {
            error!(kind = ?diagnostic.kind, "{}", err);
        }
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn factory_bind_keeps_name_and_configured_address() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(ScanError::FactoryBind {
            name: "sushiswap".to_string(),
            address: "0xnot-an-address".to_string(),
            message: "invalid hex".to_string(),
        });

        let entry = &diagnostics.entries()[0];
        assert_eq!(entry.kind, DiagnosticKind::FactoryBind);
        assert_eq!(entry.factory.as_deref(), Some("sushiswap"));
        assert_eq!(entry.factory_address.as_deref(), Some("0xnot-an-address"));
        assert!(entry.reason.contains("invalid hex"));
    }

    #[test]
    fn serialized_diagnostic_skips_absent_context() {
        let pool = address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc");
        let diagnostic = Diagnostic::from(&ScanError::LowReserves {
            pool,
            factory: Address::ZERO,
        });

        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "low_reserves");
        assert_eq!(json["reason"], "low reserves");
        assert!(json.get("index").is_none());
        assert!(json.get("erc20_address").is_none());
        assert!(json.get("lp_address").is_some());
    }

    #[test]
    fn counts_by_kind() {
        let mut diagnostics = Diagnostics::new();
        for index in 0..3 {
            diagnostics.record(ScanError::PoolIndex {
                factory: Address::ZERO,
                index,
                message: "execution reverted".to_string(),
            });
        }
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::PoolIndex), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::PoolData), 0);
    }
}
