use crate::moments::MomentSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative reading of the skewness estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkewCategory {
    LeftTailed,
    Symmetric,
    RightTailed,
}

impl SkewCategory {
    pub fn explanation(&self) -> &'static str {
        match self {
            SkewCategory::LeftTailed => {
                "The distribution leans left: large losses are more common than large gains."
            }
            SkewCategory::Symmetric => {
                "The distribution is roughly symmetric, as a bell curve should be."
            }
            SkewCategory::RightTailed => {
                "The distribution leans right: large gains are more common than large losses."
            }
        }
    }
}

impl fmt::Display for SkewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkewCategory::LeftTailed => "left-tailed",
            SkewCategory::Symmetric => "symmetric",
            SkewCategory::RightTailed => "right-tailed",
        };
        f.write_str(label)
    }
}

/// Qualitative reading of the excess-kurtosis estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KurtosisCategory {
    LightTailed,
    NormalTailed,
    HeavyTailed,
}

impl KurtosisCategory {
    pub fn explanation(&self) -> &'static str {
        match self {
            KurtosisCategory::LightTailed => {
                "The tails are thinner than a bell curve: extreme returns are rarer than normal."
            }
            KurtosisCategory::NormalTailed => {
                "The tails are close to those of a bell curve."
            }
            KurtosisCategory::HeavyTailed => {
                "The tails are fatter than a bell curve: extreme returns happen more often than normal."
            }
        }
    }
}

impl fmt::Display for KurtosisCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KurtosisCategory::LightTailed => "light-tailed",
            KurtosisCategory::NormalTailed => "normal-tailed",
            KurtosisCategory::HeavyTailed => "heavy-tailed",
        };
        f.write_str(label)
    }
}

/// The outcome of classifying a `MomentSummary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub skew_category: SkewCategory,
    pub kurtosis_category: KurtosisCategory,
    pub skew_explanation: String,
    pub kurtosis_explanation: String,
}

/// Band half-widths around zero. Values exactly on a boundary belong to the
/// middle category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    pub skew: f64,
    pub kurtosis: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            skew: 0.5,
            kurtosis: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    thresholds: ClassificationThresholds,
}

impl Classifier {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify_skewness(&self, skewness: f64) -> SkewCategory {
        if skewness < -self.thresholds.skew {
            SkewCategory::LeftTailed
        } else if skewness > self.thresholds.skew {
            SkewCategory::RightTailed
        } else {
            SkewCategory::Symmetric
        }
    }

    pub fn classify_kurtosis(&self, excess_kurtosis: f64) -> KurtosisCategory {
        if excess_kurtosis < -self.thresholds.kurtosis {
            KurtosisCategory::LightTailed
        } else if excess_kurtosis > self.thresholds.kurtosis {
            KurtosisCategory::HeavyTailed
        } else {
            KurtosisCategory::NormalTailed
        }
    }

    pub fn classify(&self, moments: &MomentSummary) -> Classification {
        let skew_category = self.classify_skewness(moments.skewness);
        let kurtosis_category = self.classify_kurtosis(moments.excess_kurtosis);
        Classification {
            skew_category,
            kurtosis_category,
            skew_explanation: skew_category.explanation().to_string(),
            kurtosis_explanation: kurtosis_category.explanation().to_string(),
        }
    }
}
