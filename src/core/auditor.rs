use crate::models::{Asset, AuditReport, StatusTier};
use crate::utils::{AuditorError, Result};

/// Social integrity per link count. Stepped by 33.3, never reaching 100.
const SOCIAL_INTEGRITY_STEPS: [f64; 4] = [0.0, 33.3, 66.6, 99.9];

/// Deterministic metadata auditor.
///
/// Holds no state; the same asset always produces the same report, so one
/// instance can be shared freely across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditEngine;

impl AuditEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score one asset
    pub fn audit(&self, asset: &Asset) -> Result<AuditReport> {
        if asset.mint.trim().is_empty() {
            return Err(AuditorError::InvalidAsset(
                "cannot audit an asset with an empty mint".into(),
            ));
        }

        let social_count = asset.social_count();
        let char_sum = char_sum(&asset.mint);
        let hash_factor = char_sum % 20;

        let status = select_tier(asset, social_count);
        let risk_score = tier_risk(status, hash_factor);

        let developer_reputation =
            (100.0 - risk_score - 2.0 * hash_factor as f64).clamp(0.0, 100.0);

        tracing::debug!(
            "Audited {}: {:?} risk={} socials={}",
            asset.mint,
            status,
            risk_score,
            social_count
        );

        Ok(AuditReport {
            mint: asset.mint.clone(),
            status,
            status_label: status.label().to_string(),
            risk_score,
            developer_reputation,
            social_integrity: SOCIAL_INTEGRITY_STEPS[social_count.min(3)],
            liquidity_progress: (char_sum % 100) as f64,
        })
    }

    /// Score every asset, keeping per-asset failures alongside the asset
    pub fn audit_all<'a>(&self, assets: &'a [Asset]) -> Vec<(&'a Asset, Result<AuditReport>)> {
        assets.iter().map(|a| (a, self.audit(a))).collect()
    }
}

/// Score one asset with a default engine
pub fn audit(asset: &Asset) -> Result<AuditReport> {
    AuditEngine.audit(asset)
}

/// Sum of UTF-16 code units. Not a real hash; stored scores depend on it.
pub fn char_sum(mint: &str) -> u64 {
    mint.encode_utf16().map(u64::from).sum()
}

/// Adjustment in `[0, 20)` derived from the mint
pub fn hash_factor(mint: &str) -> u64 {
    char_sum(mint) % 20
}

fn select_tier(asset: &Asset, social_count: usize) -> StatusTier {
    if social_count == 3 {
        StatusTier::Institutional
    } else if social_count >= 1 {
        StatusTier::Verified
    } else if asset.name.encode_utf16().count() > 3 && asset.symbol.encode_utf16().count() >= 3 {
        StatusTier::HighRisk
    } else {
        StatusTier::Dangerous
    }
}

fn tier_risk(tier: StatusTier, hash_factor: u64) -> f64 {
    let h = hash_factor as f64;
    match tier {
        StatusTier::Institutional => 5.0 + h,
        StatusTier::Verified => 25.0 + h,
        StatusTier::HighRisk => 60.0 + h,
        StatusTier::Dangerous => 85.0 + h / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetSource;
    use chrono::{TimeZone, Utc};

    fn asset(mint: &str, name: &str, symbol: &str) -> Asset {
        let created = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        Asset::new(mint, created, AssetSource::Primary).with_names(name, symbol)
    }

    #[test]
    fn test_short_names_are_dangerous() {
        let a = asset("AAAA1111", "X", "Y");

        // 4 * 'A'(65) + 4 * '1'(49) = 456
        assert_eq!(char_sum("AAAA1111"), 456);
        assert_eq!(hash_factor("AAAA1111"), 16);

        let report = audit(&a).unwrap();
        assert_eq!(report.status, StatusTier::Dangerous);
        assert_eq!(report.risk_score, 85.0 + 16.0 / 2.0);
        assert_eq!(report.risk_score, 93.0);
        assert_eq!(report.developer_reputation, 0.0);
        assert_eq!(report.social_integrity, 0.0);
        assert_eq!(report.liquidity_progress, 56.0);
        assert_eq!(report.status_label, "MALFORMED / DANGEROUS");
    }

    #[test]
    fn test_all_links_is_institutional() {
        let a = asset("AAAA1111", "X", "Y").with_links(
            Some("https://x.com/a"),
            Some("https://a.io"),
            Some("https://t.me/a"),
        );

        let report = audit(&a).unwrap();
        assert_eq!(report.status, StatusTier::Institutional);
        assert!(report.risk_score >= 5.0 && report.risk_score < 25.0);
        assert_eq!(report.risk_score, 21.0);
        assert_eq!(report.social_integrity, 99.9);
        assert_eq!(report.developer_reputation, 47.0);
    }

    #[test]
    fn test_single_link_is_verified() {
        let a = asset("AAAA1111", "X", "Y").with_links(None, Some("https://a.io"), Some(""));

        let report = audit(&a).unwrap();
        assert_eq!(report.status, StatusTier::Verified);
        assert_eq!(report.risk_score, 41.0);
        assert_eq!(report.social_integrity, 33.3);
    }

    #[test]
    fn test_named_without_links_is_high_risk() {
        let report = audit(&asset("AAAA1111", "Pepe", "PEP")).unwrap();
        assert_eq!(report.status, StatusTier::HighRisk);
        assert_eq!(report.risk_score, 76.0);

        // name must be longer than 3
        let report = audit(&asset("AAAA1111", "Pep", "PEP")).unwrap();
        assert_eq!(report.status, StatusTier::Dangerous);
    }

    #[test]
    fn test_audit_is_deterministic() {
        for mint in ["So11111111111111111111111111111111111111112", "7xKXtg2CW87d97", "pump"] {
            let a = asset(mint, "Token Name", "TKN").with_links(Some("t"), None, None);
            assert_eq!(audit(&a).unwrap(), audit(&a).unwrap());
        }
    }

    #[test]
    fn test_tier_risk_is_monotonic() {
        for h in 0..20 {
            let institutional = tier_risk(StatusTier::Institutional, h);
            let verified = tier_risk(StatusTier::Verified, h);
            let high = tier_risk(StatusTier::HighRisk, h);
            let dangerous = tier_risk(StatusTier::Dangerous, h);

            assert!(institutional < verified, "h={}", h);
            assert!(verified < high, "h={}", h);
            assert!(high < dangerous, "h={}", h);
        }
    }

    #[test]
    fn test_social_integrity_steps() {
        let links = [
            (None, None, None),
            (Some("t"), None, None),
            (Some("t"), Some("w"), None),
            (Some("t"), Some("w"), Some("g")),
        ];
        for (count, (t, w, g)) in links.into_iter().enumerate() {
            let a = asset("Mint", "Name", "SYM").with_links(t, w, g);
            let report = audit(&a).unwrap();
            assert_eq!(report.social_integrity, SOCIAL_INTEGRITY_STEPS[count]);
        }
    }

    #[test]
    fn test_liquidity_tracks_char_sum() {
        let a = asset("zz", "Name", "SYM");
        // 'z' = 122
        let report = audit(&a).unwrap();
        assert_eq!(report.liquidity_progress, (244 % 100) as f64);
    }

    #[test]
    fn test_empty_mint_is_rejected() {
        let err = audit(&asset("", "Name", "SYM")).unwrap_err();
        assert!(matches!(err, AuditorError::InvalidAsset(_)));

        assert!(audit(&asset("   ", "Name", "SYM")).is_err());
    }

    #[test]
    fn test_sub_scores_stay_in_range() {
        for mint in ["a", "AAAA1111", "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz", "ÿü"] {
            let report = audit(&asset(mint, "", "")).unwrap();
            for score in [
                report.developer_reputation,
                report.social_integrity,
                report.liquidity_progress,
            ] {
                assert!((0.0..=100.0).contains(&score), "{} out of range", score);
            }
        }
    }
}
