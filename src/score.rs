use crate::models::CountryComparison;
use serde::{Deserialize, Serialize};

/// Aggregate of the first-entry scores for one country.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: f64,
    /// Number of agencies that supplied a usable score.
    pub count: usize,
    /// `total / count`, or 0 when no agency supplied a score.
    pub average: f64,
}

/// Average the most recent score of every agency.
///
/// A score is usable when present, finite and non-zero; the backend reports
/// unknown scores as 0.
pub fn score_summary(data: &CountryComparison) -> ScoreSummary {
    let mut total = 0.0;
    let mut count = 0usize;
    for entries in data.ratings.values() {
        let score = entries.first().and_then(|e| e.te_rating);
        if let Some(s) = score.filter(|s| s.is_finite() && *s != 0.0) {
            total += s;
            count += 1;
        }
    }
    let average = if count > 0 { total / count as f64 } else { 0.0 };
    ScoreSummary {
        total,
        count,
        average,
    }
}

pub fn average_score(data: &CountryComparison) -> f64 {
    score_summary(data).average
}

/// One decimal, exact halves rounded away from zero: 80.25 is "80.3".
///
/// `{:.1}` alone rounds exact halves to even. A value sits exactly halfway
/// between two tenths only when four times it is an odd integer.
pub fn fmt_score(score: f64) -> String {
    let quarters = score * 4.0;
    let is_tie =
        quarters.is_finite() && quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0;
    let rounded = if is_tie {
        score.signum() * ((score.abs() * 10.0).floor() + 1.0) / 10.0
    } else {
        score
    };
    format!("{rounded:.1}")
}

/// Qualitative band for an average score, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditBand {
    Excellent,
    VeryStrong,
    Strong,
    Good,
    Moderate,
    Speculative,
    HighlySpeculative,
    SignificantRisk,
}

impl CreditBand {
    /// Lower bounds are inclusive: 90 is `Excellent`, 89.9 is `VeryStrong`.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            CreditBand::Excellent
        } else if score >= 80.0 {
            CreditBand::VeryStrong
        } else if score >= 70.0 {
            CreditBand::Strong
        } else if score >= 60.0 {
            CreditBand::Good
        } else if score >= 50.0 {
            CreditBand::Moderate
        } else if score >= 40.0 {
            CreditBand::Speculative
        } else if score >= 30.0 {
            CreditBand::HighlySpeculative
        } else {
            CreditBand::SignificantRisk
        }
    }

    pub fn narrative(self, country: &str) -> String {
        match self {
            CreditBand::Excellent => {
                format!("{country} has excellent creditworthiness with minimal risk.")
            }
            CreditBand::VeryStrong => {
                format!("{country} has very strong creditworthiness with low risk.")
            }
            CreditBand::Strong => {
                format!("{country} has strong creditworthiness with moderate risk.")
            }
            CreditBand::Good => {
                format!("{country} has good creditworthiness with manageable risk.")
            }
            CreditBand::Moderate => {
                format!("{country} has moderate creditworthiness with some risk concerns.")
            }
            CreditBand::Speculative => {
                format!("{country} has speculative creditworthiness with substantial risk.")
            }
            CreditBand::HighlySpeculative => {
                format!("{country} has highly speculative creditworthiness with high risk.")
            }
            CreditBand::SignificantRisk => format!("{country} has significant credit risk concerns."),
        }
    }
}

/// Size of the score gap between the best and worst rated country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapClass {
    Significant,
    Moderate,
    Small,
}

impl GapClass {
    pub fn from_gap(gap: f64) -> Self {
        if gap > 30.0 {
            GapClass::Significant
        } else if gap > 10.0 {
            GapClass::Moderate
        } else {
            GapClass::Small
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GapClass::Significant => "significant",
            GapClass::Moderate => "moderate",
            GapClass::Small => "small",
        }
    }

    pub fn phrase(self, gap: f64) -> String {
        format!(
            "There is a {} difference ({} points) between the two countries.",
            self.label(),
            fmt_score(gap)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedScore {
    pub country: String,
    pub average: f64,
}

/// Ranking of the compared countries plus the narrative built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Highest average first. Ties keep the input order.
    pub ranking: Vec<RankedScore>,
    pub gap: Option<f64>,
    pub gap_class: Option<GapClass>,
    pub text: String,
}

impl Analysis {
    pub fn highest(&self) -> Option<&RankedScore> {
        self.ranking.first()
    }

    /// Only present when two or more countries were compared.
    pub fn lowest(&self) -> Option<&RankedScore> {
        if self.ranking.len() > 1 {
            self.ranking.last()
        } else {
            None
        }
    }
}

/// Rank countries by average score and describe the spread.
pub fn analyze(results: &[CountryComparison]) -> Analysis {
    let mut ranking: Vec<RankedScore> = results
        .iter()
        .map(|r| RankedScore {
            country: r.country.clone(),
            average: average_score(r),
        })
        .collect();
    ranking.sort_by(|a, b| b.average.total_cmp(&a.average));

    if ranking.is_empty() {
        return Analysis {
            ranking,
            gap: None,
            gap_class: None,
            text: "No data available for analysis.".to_string(),
        };
    }
    let highest = &ranking[0];
    let lowest = &ranking[ranking.len() - 1];

    let mut text = format!(
        "{} has the higher average credit rating at {}/100",
        highest.country,
        fmt_score(highest.average)
    );
    let (gap, gap_class) = if ranking.len() > 1 {
        let gap = highest.average - lowest.average;
        let class = GapClass::from_gap(gap);
        text.push_str(&format!(
            ", while {} has the lower at {}/100. {}",
            lowest.country,
            fmt_score(lowest.average),
            class.phrase(gap)
        ));
        (Some(gap), Some(class))
    } else {
        text.push('.');
        (None, None)
    };

    Analysis {
        ranking,
        gap,
        gap_class,
        text,
    }
}
