// 風險等級對應的顯示資訊 (標籤、顏色、建議)，與數值模型分離
use crate::domain::model::RiskTier;

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::High => "High",
            RiskTier::Medium => "Medium",
            RiskTier::Low => "Low",
        }
    }

    /// Hex color used by dashboards.
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::High => "#e63946",
            RiskTier::Medium => "#ff6f61",
            RiskTier::Low => "#2a9d8f",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            RiskTier::High => "discard product / review temperature control",
            RiskTier::Medium => "use immediately, no extended storage",
            RiskTier::Low => "continue normal handling",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            RiskTier::High => &[
                "Immediate action required",
                "Discard the food product",
                "Review temperature control procedures",
                "Check storage conditions",
            ],
            RiskTier::Medium => &[
                "Use the product immediately",
                "Do not store for extended periods",
                "Consider additional safety measures",
            ],
            RiskTier::Low => &[
                "Product is within safe parameters",
                "Continue normal handling procedures",
                "Maintain current storage conditions",
            ],
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
