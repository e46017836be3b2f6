//! Static plan catalog shown on the quotes step.
//!
//! Prices are fixed; nothing here is computed from the answers. The
//! recommended plan is flagged by position only.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// Index of the plan highlighted as "Recommended".
pub const RECOMMENDED_INDEX: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectablePlan {
    pub name: String,
    pub monthly_price: u32,
    pub features: Vec<String>,
}

impl SelectablePlan {
    pub fn new<I, S>(name: impl Into<String>, monthly_price: u32, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            monthly_price,
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    /// Price tag as rendered on the plan card, e.g. `$142/month`.
    pub fn price_label(&self) -> String {
        format!("${}/month", self.monthly_price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    plans: Vec<SelectablePlan>,
}

impl PlanCatalog {
    /// The three coverage tiers offered by InsureQuick.
    pub fn standard() -> Self {
        Self {
            plans: vec![
                SelectablePlan::new(
                    "Basic Coverage",
                    89,
                    [
                        "Liability Coverage",
                        "State Minimum Requirements",
                        "24/7 Claims Support",
                        "Online Account Management",
                    ],
                ),
                SelectablePlan::new(
                    "Standard Coverage",
                    142,
                    [
                        "Comprehensive Coverage",
                        "Collision Coverage",
                        "Roadside Assistance",
                        "Rental Car Coverage",
                        "Glass Coverage",
                    ],
                ),
                SelectablePlan::new(
                    "Premium Coverage",
                    198,
                    [
                        "Full Coverage",
                        "Gap Insurance",
                        "New Car Replacement",
                        "Accident Forgiveness",
                        "Vanishing Deductible",
                    ],
                ),
            ],
        }
    }

    pub fn plans(&self) -> &[SelectablePlan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&SelectablePlan, WizardError> {
        self.plans.get(index).ok_or(WizardError::UnknownPlan(index))
    }

    pub fn is_recommended(&self, index: usize) -> bool {
        index == RECOMMENDED_INDEX && index < self.plans.len()
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_three_tiers() {
        let catalog = PlanCatalog::standard();
        let names: Vec<&str> = catalog.plans().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Basic Coverage", "Standard Coverage", "Premium Coverage"]);
        assert_eq!(catalog.get(2).unwrap().monthly_price, 198);
        assert_eq!(catalog.get(0).unwrap().features.len(), 4);
    }

    #[test]
    fn recommended_by_position() {
        let catalog = PlanCatalog::standard();
        assert!(!catalog.is_recommended(0));
        assert!(catalog.is_recommended(1));
        assert_eq!(catalog.get(RECOMMENDED_INDEX).unwrap().name, "Standard Coverage");
    }

    #[test]
    fn unknown_index() {
        assert_eq!(PlanCatalog::standard().get(3), Err(WizardError::UnknownPlan(3)));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(PlanCatalog::standard().get(1).unwrap()).unwrap();
        assert_eq!(json["monthlyPrice"], 142);
        assert_eq!(json["name"], "Standard Coverage");
    }
}
