use super::{Ratio, RatioBundle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    Caution,
}

impl Rating {
    pub fn from_score(score: u8) -> Self {
        if score >= 5 {
            Rating::Excellent
        } else if score >= 3 {
            Rating::Good
        } else {
            Rating::Caution
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Caution => "caution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub tone: Tone,
    pub statement: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthAssessment {
    pub score: u8,
    pub findings: Vec<Finding>,
    pub rating: Rating,
}

pub const MAX_SCORE: u8 = 6;

fn finding(points: u8, statements: [&'static str; 3]) -> (u8, Finding) {
    let (tone, statement) = match points {
        2 => (Tone::Positive, statements[0]),
        1 => (Tone::Neutral, statements[1]),
        _ => (Tone::Negative, statements[2]),
    };
    (points, Finding { tone, statement })
}

pub fn assess_health(bundle: &RatioBundle) -> HealthAssessment {
    let net_margin = bundle.value_or_zero(Ratio::NetMargin);
    let debt_to_equity = bundle.value_or_zero(Ratio::DebtToEquity);
    let roe_pct = bundle.value_or_zero(Ratio::Roe) * 100.0;

    let profitability = if net_margin > 10.0 {
        2
    } else if net_margin > 5.0 {
        1
    } else {
        0
    };
    let leverage = if debt_to_equity < 0.5 {
        2
    } else if debt_to_equity < 1.0 {
        1
    } else {
        0
    };
    let efficiency = if roe_pct > 15.0 {
        2
    } else if roe_pct > 10.0 {
        1
    } else {
        0
    };

    let rules = [
        finding(
            profitability,
            ["excellent profitability", "good profitability", "low profitability"],
        ),
        finding(
            leverage,
            ["stable debt level", "moderate debt level", "high debt level"],
        ),
        finding(
            efficiency,
            ["high capital efficiency", "good capital efficiency", "low capital efficiency"],
        ),
    ];

    let score: u8 = rules.iter().map(|(points, _)| points).sum();
    HealthAssessment {
        score,
        findings: rules.into_iter().map(|(_, f)| f).collect(),
        rating: Rating::from_score(score),
    }
}
