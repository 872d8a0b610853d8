use serde::{Deserialize, Serialize};

/// Risk tiers, ordered from safest to riskiest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusTier {
    #[serde(rename = "INSTITUTIONAL_GRADE")]
    Institutional,
    #[serde(rename = "VERIFIED_METADATA")]
    Verified,
    #[serde(rename = "HIGH_RISK_ANONYMOUS")]
    HighRisk,
    #[serde(rename = "MALFORMED_SIGNATURE")]
    Dangerous,
}

impl StatusTier {
    pub fn label(&self) -> &'static str {
        match self {
            StatusTier::Institutional => "INSTITUTIONAL GRADE",
            StatusTier::Verified => "VERIFIED METADATA",
            StatusTier::HighRisk => "HIGH RISK / ANONYMOUS",
            StatusTier::Dangerous => "MALFORMED / DANGEROUS",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            StatusTier::Institutional => "🟢",
            StatusTier::Verified => "🔵",
            StatusTier::HighRisk => "🟠",
            StatusTier::Dangerous => "🔴",
        }
    }
}

impl std::fmt::Display for StatusTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Letter grade shown next to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReliabilityGrade {
    A,
    B,
    C,
    D,
    F,
}

impl ReliabilityGrade {
    pub fn from_risk(risk_score: f64) -> Self {
        if risk_score < 20.0 {
            ReliabilityGrade::A
        } else if risk_score < 40.0 {
            ReliabilityGrade::B
        } else if risk_score < 60.0 {
            ReliabilityGrade::C
        } else if risk_score < 80.0 {
            ReliabilityGrade::D
        } else {
            ReliabilityGrade::F
        }
    }
}

/// Derived risk/reputation report for one asset. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub mint: String,
    pub status: StatusTier,
    pub status_label: String,
    pub risk_score: f64,
    pub developer_reputation: f64,
    pub social_integrity: f64,
    pub liquidity_progress: f64,
}

impl AuditReport {
    pub fn grade(&self) -> ReliabilityGrade {
        ReliabilityGrade::from_risk(self.risk_score)
    }
}

impl std::fmt::Display for AuditReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "                 LAUNCH AUDIT REPORT")?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f)?;
        writeln!(f, "Mint: {}", self.mint)?;
        writeln!(f)?;
        writeln!(f, "═══ VERDICT ═══")?;
        writeln!(f, "{} {}", self.status.emoji(), self.status_label)?;
        writeln!(f, "Risk Score: {:.1}/100 (grade {:?})", self.risk_score, self.grade())?;
        writeln!(f)?;
        writeln!(f, "═══ SUB-SCORES ═══")?;
        writeln!(f, "Developer Reputation: {:>5.1}", self.developer_reputation)?;
        writeln!(f, "Social Integrity:     {:>5.1}", self.social_integrity)?;
        writeln!(f, "Liquidity Progress:   {:>5.1}", self.liquidity_progress)?;
        writeln!(f)?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;

        Ok(())
    }
}
